//! OCR fallback for documents without extractable styled text.
//!
//! Recognized text carries no size or position, so the heuristic only looks
//! at the shape of each line and every accepted line becomes an `H2`.

use crate::cancel::CancelToken;
use crate::classify::Level;
use crate::config::HeuristicConfig;
use crate::consolidate::{is_noise, OutlineEntry};
use crate::error::OutlineResult;
use crate::text;
use std::path::Path;

/// Text recognition over a document's rasterized pages.
pub trait OcrSource: Send + Sync {
    /// Whether recognition can run at all in this build and environment.
    fn is_available(&self) -> bool;

    /// Recognized text per page, in page order.
    fn recognize_pages(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<String>>;
}

/// Stand-in used when OCR is not installed or is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOcr;

impl OcrSource for NoOcr {
    fn is_available(&self) -> bool {
        false
    }

    fn recognize_pages(&self, _path: &Path, _cancel: &CancelToken) -> OutlineResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Short, capitalized, and not a sentence.
pub fn is_ocr_heading(line: &str, config: &HeuristicConfig) -> bool {
    let line = line.trim();
    if line.chars().count() < config.min_line_chars {
        return false;
    }
    text::word_count(line) <= config.ocr_max_words
        && (text::is_uppercase(line) || text::is_title_case(line))
        && !line.ends_with('.')
}

/// Scan recognized page texts for headings. Page numbers are 1-based.
pub fn ocr_headings(pages: &[String], config: &HeuristicConfig) -> Vec<OutlineEntry> {
    let mut headings = Vec::new();
    for (idx, page_text) in pages.iter().enumerate() {
        for line in page_text.lines().map(str::trim) {
            if is_ocr_heading(line, config) && !is_noise(line, config.min_line_chars) {
                headings.push(OutlineEntry {
                    level: Level::H2,
                    text: line.to_string(),
                    page: idx + 1,
                });
            }
        }
    }
    headings
}

/// Run recognition and the heading heuristic.
///
/// An unavailable source yields no headings. A failing source yields no
/// headings when the text layer had lines; when it had none, OCR was the only
/// way to read the document and the failure is returned.
pub fn recognize_headings(
    source: &dyn OcrSource,
    path: &Path,
    config: &HeuristicConfig,
    has_text_layer: bool,
    cancel: &CancelToken,
) -> OutlineResult<Vec<OutlineEntry>> {
    if !source.is_available() {
        tracing::debug!("OCR fallback unavailable for {}", path.display());
        return Ok(Vec::new());
    }

    match source.recognize_pages(path, cancel) {
        Ok(pages) => {
            let headings = ocr_headings(&pages, config);
            tracing::debug!(
                "OCR fallback found {} headings on {} pages",
                headings.len(),
                pages.len()
            );
            Ok(headings)
        }
        Err(e) if e.is_cancelled() || !has_text_layer => Err(e),
        Err(e) => {
            tracing::warn!("OCR fallback failed for {}: {}", path.display(), e);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutlineError;

    struct FixedOcr(Vec<String>);

    impl OcrSource for FixedOcr {
        fn is_available(&self) -> bool {
            true
        }

        fn recognize_pages(&self, _path: &Path, _cancel: &CancelToken) -> OutlineResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenOcr;

    impl OcrSource for BrokenOcr {
        fn is_available(&self) -> bool {
            true
        }

        fn recognize_pages(&self, _path: &Path, _cancel: &CancelToken) -> OutlineResult<Vec<String>> {
            Err(OutlineError::ocr("engine crashed"))
        }
    }

    #[test]
    fn test_heading_shapes() {
        let config = HeuristicConfig::default();
        assert!(is_ocr_heading("SUMMARY", &config));
        assert!(is_ocr_heading("Project Timeline", &config));
        assert!(!is_ocr_heading("This is body text.", &config));
        assert!(!is_ocr_heading("Project timeline", &config));
        assert!(!is_ocr_heading("END.", &config));
        assert!(!is_ocr_heading("OK", &config));
    }

    #[test]
    fn test_ocr_headings_per_page() {
        let config = HeuristicConfig::default();
        let pages = vec![
            "SUMMARY\nThis is body text.\n\nCONCLUSION".to_string(),
            "  Next Steps  \nTABLE OF CONTENTS".to_string(),
        ];
        let headings = ocr_headings(&pages, &config);
        let got: Vec<(&str, usize)> = headings.iter().map(|h| (h.text.as_str(), h.page)).collect();
        assert_eq!(got, [("SUMMARY", 1), ("CONCLUSION", 1), ("Next Steps", 2)]);
        assert!(headings.iter().all(|h| h.level == Level::H2));
    }

    #[test]
    fn test_unavailable_and_failing_sources_yield_nothing() {
        let config = HeuristicConfig::default();
        let cancel = CancelToken::new();
        let path = Path::new("scan.pdf");
        assert!(recognize_headings(&NoOcr, path, &config, true, &cancel).unwrap().is_empty());
        assert!(recognize_headings(&NoOcr, path, &config, false, &cancel).unwrap().is_empty());
        assert!(recognize_headings(&BrokenOcr, path, &config, true, &cancel).unwrap().is_empty());

        let fixed = FixedOcr(vec!["APPENDIX".to_string()]);
        assert_eq!(recognize_headings(&fixed, path, &config, false, &cancel).unwrap().len(), 1);
    }

    #[test]
    fn test_failure_without_text_layer_is_an_error() {
        let config = HeuristicConfig::default();
        let result =
            recognize_headings(&BrokenOcr, Path::new("scan.pdf"), &config, false, &CancelToken::new());
        assert!(matches!(result, Err(OutlineError::Ocr(_))));
    }
}
