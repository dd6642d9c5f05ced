// Font lookup for the PDF documents.

use genpdf::fonts::{FontData, FontFamily};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use snafu::prelude::*;

use crate::convert::*;

pub const BUNDLED_FONT_FILE: &str = "DejaVuSans.ttf";
pub const BUNDLED_BOLD_FONT_FILE: &str = "DejaVuSans-Bold.ttf";

// Relative to each search directory.
const BUNDLED_REL_PATHS: [&str; 2] = ["dejavu-sans-ttf-2.37/ttf", "."];

// Where the usual packages install DejaVu Sans.
const SYSTEM_FONT_DIRS: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu-sans-fonts",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
];

// Compiled into the executable, so that a font is always available.
static EMBEDDED_REGULAR: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
static EMBEDDED_BOLD: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");

/// The directories searched for the bundled font, in order.
pub fn bundled_search_dirs(font_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(d) = font_dir {
        dirs.push(d.to_path_buf());
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    {
        dirs.push(exe_dir.join("fonts"));
        dirs.push(exe_dir);
    }
    dirs.push(PathBuf::from("."));
    dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
    dirs
}

/// Loads the font family used by all the documents.
///
/// DejaVu Sans is looked up on disk first, so that it can be replaced without
/// rebuilding. When no usable file is found, the copy embedded in the
/// executable is used.
pub fn load_font_family(font_dir: Option<&Path>) -> ConvertResult<FontFamily<FontData>> {
    let dirs = bundled_search_dirs(font_dir);
    if let Some(family) = load_bundled(&dirs) {
        return Ok(family);
    }
    warn!(
        "Could not find a usable {} (searched: {:?}), using the embedded copy",
        BUNDLED_FONT_FILE, dirs
    );
    embedded_font_family()
}

/// The DejaVu Sans family embedded in the executable.
pub fn embedded_font_family() -> ConvertResult<FontFamily<FontData>> {
    let regular = FontData::new(EMBEDDED_REGULAR.to_vec(), None).context(FontUnavailableSnafu {
        name: BUNDLED_FONT_FILE,
    })?;
    let bold = FontData::new(EMBEDDED_BOLD.to_vec(), None).context(FontUnavailableSnafu {
        name: BUNDLED_BOLD_FONT_FILE,
    })?;
    Ok(family_of(regular, bold))
}

fn family_of(regular: FontData, bold: FontData) -> FontFamily<FontData> {
    FontFamily {
        regular: regular.clone(),
        italic: regular,
        bold: bold.clone(),
        bold_italic: bold,
    }
}

fn load_font_file(path: &Path) -> Option<FontData> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to read font {:?}: {}", path, e);
            return None;
        }
    };
    match FontData::new(data, None) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Failed to register font {:?}: {}", path, e);
            None
        }
    }
}

fn load_bundled(dirs: &[PathBuf]) -> Option<FontFamily<FontData>> {
    for dir in dirs {
        for rel in BUNDLED_REL_PATHS {
            let font_dir = dir.join(rel);
            let regular_path = font_dir.join(BUNDLED_FONT_FILE);
            if !regular_path.exists() {
                continue;
            }
            debug!("load_bundled: trying {:?}", regular_path);
            let regular = match load_font_file(&regular_path) {
                Some(f) => f,
                None => continue,
            };
            // The bold face is optional: headings are then set in the regular face.
            let bold_path = font_dir.join(BUNDLED_BOLD_FONT_FILE);
            let bold = if bold_path.exists() {
                load_font_file(&bold_path).unwrap_or_else(|| regular.clone())
            } else {
                regular.clone()
            };
            info!("Using font {:?}", regular_path);
            return Some(family_of(regular, bold));
        }
    }
    None
}
