use thiserror::Error;

pub type SvResult<T> = Result<T, SvError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvError {
    #[error("Column not found: {column}")]
    MissingColumn { column: String },

    #[error("Cannot parse timestamp: {value:?}")]
    TimeParse { value: String },

    #[error("Non-numeric value in column {column} (row {row}): {value:?}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Row {row} has {found} fields, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
