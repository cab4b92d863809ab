//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScreenerError {
    fn from(err: anyhow::Error) -> Self {
        ScreenerError::AnalysisFailed(format!("{:#}", err))
    }
}
