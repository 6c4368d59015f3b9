pub mod error;
pub mod extractor;
pub mod ocr;

use extractor::PdfiumLineSource;
use ocr::OcrEngine;
use outliner_core::{CancelToken, DocumentOutline, HeuristicConfig, OutlineEngine, OutlineResult};
use std::path::Path;

/// Build the outline of a PDF file using default options
pub fn outline_pdf<P: AsRef<Path>>(path: P) -> OutlineResult<DocumentOutline> {
    outline_pdf_with_options(path, PdfOptions::default(), HeuristicConfig::default())
}

/// Build the outline of a PDF file with custom backend options and heuristics
pub fn outline_pdf_with_options<P: AsRef<Path>>(
    path: P,
    options: PdfOptions,
    config: HeuristicConfig,
) -> OutlineResult<DocumentOutline> {
    let engine = engine_with_ocr(config, options.clone());
    let source = PdfiumLineSource::new(options);
    engine.process(path.as_ref(), &source, &CancelToken::new())
}

/// Outline engine wired to the Tesseract fallback for this backend.
pub fn engine_with_ocr(config: HeuristicConfig, options: PdfOptions) -> OutlineEngine {
    OutlineEngine::new(config).with_ocr(OcrEngine::new(options))
}

// Re-export commonly used types
pub use error::PdfError;
pub use extractor::PdfOptions;
