//! sv-io: loading delimited text files into tables.

pub mod delimited;
pub mod format;

pub use delimited::{DEFAULT_DELIMITERS, load_table, parse_delimiter, read_table, sniff_delimiter};
pub use format::{InputFormat, detect_format};

pub type IoResult<T> = Result<T, IoError>;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table error: {0}")]
    Table(#[from] sv_core::SvError),

    #[error("Unsupported input format: {what}")]
    UnsupportedFormat { what: String },

    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(String),

    #[error("No columns found in input")]
    Empty,
}
