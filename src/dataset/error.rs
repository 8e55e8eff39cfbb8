use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("column `{name}` not found in table header")]
    MissingColumn { name: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{token}` is not a number")]
    MalformedNumber { line: usize, token: String },

    #[error("column `{name}` holds {value} at row {row}; labels must be 0 or 1")]
    NonBinaryLabel { name: String, row: usize, value: f64 },

    #[error("table has no data rows")]
    EmptyTable,
}
