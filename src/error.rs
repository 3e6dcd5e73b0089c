use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("page config error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("script line {line}: {reason}")]
    ScriptError { line: u64, reason: String },
    #[error("validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, LandingError>;
