//! Error types for outline extraction.

use thiserror::Error;

/// Result type for outline operations.
pub type OutlineResult<T> = Result<T, OutlineError>;

/// Errors that can occur while building a document outline.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// The extraction collaborator could not open or parse the document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Processing was cancelled because the time budget ran out.
    #[error("Processing cancelled after exceeding the time budget")]
    Cancelled,

    /// Text recognition failed or is not installed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Language identification failed for a line.
    #[error("Language tagging error: {0}")]
    LanguageTag(String),

    /// Heuristic configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutlineError {
    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create an OCR error.
    pub fn ocr(message: impl Into<String>) -> Self {
        Self::Ocr(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True when the error came from an expired time budget.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
