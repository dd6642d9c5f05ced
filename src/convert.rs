use log::{debug, info};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use survey_sections::{ColumnGroups, Table};

use crate::args::Args;
use crate::convert::config_reader::*;
use crate::convert::document::SubmissionDocument;
use crate::convert::io_common::{parse_row_ranges, InputType, OutputNamer};

pub mod config_reader;
pub mod document;
pub mod fonts;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod render;

#[derive(Debug, Snafu)]
pub enum ConvertError {
    #[snafu(display("Error opening file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the CSV content"))]
    CsvParse { source: csv::Error },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find worksheet {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("The input has no header row"))]
    EmptyInput {},
    #[snafu(display("Unknown input type {input_type:?} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },

    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(display("Error creating the output directory {path}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot load font {name}"))]
    FontUnavailable {
        source: genpdf::error::Error,
        name: String,
    },
    #[snafu(display("Error rendering {path}"))]
    Rendering {
        source: genpdf::error::Error,
        path: String,
    },

    #[snafu(display("No rows selected."))]
    EmptySelection {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "out_pdfs";

pub fn read_table(
    path: &str,
    input_type: Option<&str>,
    worksheet: Option<&str>,
) -> ConvertResult<Table> {
    let it = InputType::from_args(path, input_type)?;
    info!("Attempting to read {:?} file {:?}", it, path);
    let table = match it {
        InputType::Csv => io_csv::read_csv_table(path)?,
        InputType::Xlsx => io_xlsx::read_xlsx_table(path, worksheet)?,
    };
    info!(
        "Read {} rows and {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// The rows to convert: the parsed `--rows` expression, or all the rows.
pub fn select_rows(rows_expr: Option<&str>, num_rows: usize) -> Vec<usize> {
    match rows_expr {
        Some(_) if num_rows == 0 => vec![],
        Some(expr) => parse_row_ranges(expr, num_rows - 1),
        None => (0..num_rows).collect(),
    }
}

/// Writes one PDF per selected row into `outdir`, and returns the paths written.
///
/// The first error stops the conversion.
pub fn convert_rows(
    table: &Table,
    selection: &[usize],
    settings: &Settings,
    fonts: &genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
    outdir: &Path,
) -> ConvertResult<Vec<PathBuf>> {
    ensure!(!selection.is_empty(), EmptySelectionSnafu {});

    fs::create_dir_all(outdir).context(CreatingOutputDirSnafu {
        path: outdir.display().to_string(),
    })?;

    let groups = ColumnGroups::from_columns(table.columns());
    debug!(
        "convert_rows: {} columns in {} question groups",
        table.columns().len(),
        groups.len()
    );
    let exclusions = settings.sections.exclusions();
    let mut namer = OutputNamer::new(outdir);
    let mut written: Vec<PathBuf> = Vec::new();

    for &idx in selection {
        let row = match table.row(idx) {
            Some(row) => row,
            None => whatever!("Row {} is out of range", idx),
        };
        let file_title = settings.document.file_title(&row, &groups);
        let out_path = namer.next_path(file_title, idx);
        debug!("convert_rows: row {} -> {:?}", idx, out_path);

        let doc = SubmissionDocument::from_row(
            &row,
            &groups,
            &settings.sections,
            &exclusions,
            &settings.document,
        );
        render::render_pdf(&doc, fonts, &out_path)?;
        println!("Wrote {}", out_path.display());
        written.push(out_path);
    }
    Ok(written)
}

pub fn run_conversion(args: &Args) -> ConvertResult<()> {
    let settings = match &args.config {
        Some(p) => read_settings(p)?,
        None => Settings::default(),
    };
    debug!("settings: {:?}", settings);

    let table = read_table(
        &args.input,
        args.input_type.as_deref(),
        args.worksheet.as_deref(),
    )?;

    let selection = select_rows(args.rows.as_deref(), table.len());
    info!("Selected {} rows", selection.len());
    ensure!(!selection.is_empty(), EmptySelectionSnafu {});

    let font_dir = args
        .font_dir
        .clone()
        .or_else(|| settings.font_directory.clone());
    let fonts = fonts::load_font_family(font_dir.as_deref().map(Path::new))?;

    let outdir: String = args
        .outdir
        .clone()
        .or_else(|| settings.output_directory.clone())
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIRECTORY.to_string());

    let written = convert_rows(&table, &selection, &settings, &fonts, Path::new(&outdir))?;
    info!("Wrote {} documents into {:?}", written.len(), outdir);
    Ok(())
}
