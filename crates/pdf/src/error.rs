use outliner_core::OutlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to read PDF file: {0}")]
    ReadError(String),

    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Failed to bind PDFium: {0}")]
    LibraryError(String),

    #[error("OCR setup error: {0}")]
    OcrSetupError(String),

    #[error("OCR processing error: {0}")]
    OcrProcessingError(String),

    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    ExtractionError(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

impl From<PdfError> for OutlineError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::IoError(e) => OutlineError::Io(e),
            PdfError::OcrSetupError(_) | PdfError::OcrProcessingError(_) => {
                OutlineError::Ocr(err.to_string())
            }
            other => OutlineError::Extraction(other.to_string()),
        }
    }
}
