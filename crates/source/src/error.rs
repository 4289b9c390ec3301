use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Missing columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    Data {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
