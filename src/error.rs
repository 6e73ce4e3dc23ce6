use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Validation error on line {line}: {reason}")]
    Validation { line: usize, reason: String },
    #[error("Format error: {0}")]
    Format(String),
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl NotifierError {
    /// Batch-level errors reject the whole upload; everything else is either
    /// ambient (I/O, config) or captured per row by the dispatcher.
    pub fn is_batch_rejection(&self) -> bool {
        matches!(
            self,
            NotifierError::MissingColumns(_)
                | NotifierError::Schema(_)
                | NotifierError::Validation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
