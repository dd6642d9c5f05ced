use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::convert::*;

pub const MAX_SLUG_LEN: usize = 80;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    /// The explicit input type if provided, otherwise guessed from the file extension.
    pub fn from_args(path: &str, input_type: Option<&str>) -> ConvertResult<InputType> {
        match input_type.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "csv" => Ok(InputType::Csv),
            Some(s) if s == "xlsx" || s == "excel" => Ok(InputType::Xlsx),
            Some(s) => UnknownInputTypeSnafu { input_type: s }.fail(),
            None => {
                let ext = Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase());
                match ext.as_deref() {
                    Some("xlsx") => Ok(InputType::Xlsx),
                    _ => Ok(InputType::Csv),
                }
            }
        }
    }
}

/// Parses expressions like `0,2,5-7` into sorted, unique row indexes.
///
/// Ranges are inclusive. Tokens that cannot be parsed are skipped, and so are the
/// indexes outside of `[0, max_index]`.
pub fn parse_row_ranges(expr: &str, max_index: usize) -> Vec<usize> {
    let mut res: BTreeSet<usize> = BTreeSet::new();
    let in_range = |i: i64| i >= 0 && (i as u64) <= max_index as u64;
    for part in expr.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((a, b)) = part.split_once('-') {
            let (start, end) = match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
                (Ok(start), Ok(end)) => (start.min(end), start.max(end)),
                _ => {
                    debug!("parse_row_ranges: skipping token {:?}", part);
                    continue;
                }
            };
            // Only walk the part of the range that can match a row.
            let start = start.max(0);
            let end = end.min(max_index as i64);
            res.extend((start..=end).filter(|i| in_range(*i)).map(|i| i as usize));
        } else {
            match part.parse::<i64>() {
                Ok(i) if in_range(i) => {
                    res.insert(i as usize);
                }
                _ => {
                    debug!("parse_row_ranges: skipping token {:?}", part);
                }
            }
        }
    }
    res.into_iter().collect()
}

fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Turns a title into a file name: unsupported characters are removed, runs of
/// whitespace become a single `_`, and the result is truncated to `max_len` characters.
pub fn slugify(text: &str, max_len: usize) -> String {
    let mut res = String::new();
    let mut in_space = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                res.push('_');
                in_space = true;
            }
        } else if is_slug_char(c) {
            res.push(c);
            in_space = false;
        }
    }
    res.chars().take(max_len).collect()
}

/// Hands out the output paths, never reusing a name and never overwriting a file.
pub struct OutputNamer {
    dir: PathBuf,
    used: HashSet<String>,
}

impl OutputNamer {
    pub fn new(dir: &Path) -> OutputNamer {
        OutputNamer {
            dir: dir.to_path_buf(),
            used: HashSet::new(),
        }
    }

    /// The path for the next document. Collisions get a `_2`, `_3`, ... suffix.
    pub fn next_path(&mut self, title: Option<&str>, row_index: usize) -> PathBuf {
        let slug = title.map(|t| slugify(t, MAX_SLUG_LEN)).unwrap_or_default();
        let base = if slug.is_empty() {
            format!("row_{}", row_index)
        } else {
            slug
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        loop {
            let path = self.dir.join(format!("{}.pdf", candidate));
            if !self.used.contains(&candidate) && !path.exists() {
                self.used.insert(candidate);
                return path;
            }
            suffix += 1;
            candidate = format!("{}_{}", base, suffix);
        }
    }
}
