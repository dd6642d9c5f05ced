use clap::Parser;

/// Generates one PDF document per response of a Survey123 export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The Survey123 export, either as CSV or as an Excel (.xlsx) file.
    #[clap(value_parser)]
    pub input: String,

    /// (directory, default out_pdfs) Where the PDF files are written. The directory is created
    /// if it does not exist. Setting this option overrides what may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub outdir: Option<String>,

    /// (list of comma-separated indexes or ranges) The rows to convert, e.g. '0,2,5-7'.
    /// Rows are counted from 0, not counting the header. Default: all the rows.
    #[clap(long, value_parser)]
    pub rows: Option<String>,

    /// (file path, optional) A JSON file that describes the questions of the survey and the layout
    /// of the documents. For more information about the file format, read the documentation of the
    /// `config_reader` module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (directory, optional) The directory containing the DejaVuSans.ttf font.
    #[clap(long, value_parser)]
    pub font_dir: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
