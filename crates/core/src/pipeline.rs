//! The outline engine: runs every inference stage over one document.
//!
//! # Example
//!
//! ```rust
//! use outliner_core::{CancelToken, OutlineEngine, RawLine};
//! use std::path::Path;
//!
//! let engine = OutlineEngine::default();
//! let lines = vec![
//!     RawLine::new("Executive Summary", 20.0, true, 1, 750.0),
//!     RawLine::new("This report covers...", 11.0, false, 1, 700.0),
//!     RawLine::new("1. Background", 16.0, true, 2, 780.0),
//! ];
//! let doc = engine
//!     .process_lines(Path::new("report.pdf"), &lines, &CancelToken::new())
//!     .unwrap();
//! assert_eq!(doc.title, "Executive Summary");
//! assert_eq!(doc.outline.len(), 2);
//! ```

use crate::cancel::CancelToken;
use crate::classify::classify_all;
use crate::cluster::assign_clusters;
use crate::config::HeuristicConfig;
use crate::consolidate::{build_outline, OutlineEntry};
use crate::error::OutlineResult;
use crate::filter::CandidateFilter;
use crate::language::{tag_lines, LanguageTagger, ScriptTagger};
use crate::line::{normalize_lines, Line, RawLine};
use crate::ocr::{recognize_headings, NoOcr, OcrSource};
use crate::thresholds::Thresholds;
use crate::title::select_title;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction backend yielding styled text runs for a document.
pub trait LineSource: Send + Sync {
    /// Every styled run on every page, in extraction order. An empty result
    /// means the document has no extractable text.
    fn extract_lines(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<RawLine>>;
}

/// Title and outline for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

/// Heading inference over styled lines, with OCR as a last resort.
pub struct OutlineEngine {
    config: HeuristicConfig,
    tagger: Box<dyn LanguageTagger>,
    ocr: Box<dyn OcrSource>,
}

impl Default for OutlineEngine {
    fn default() -> Self {
        Self::new(HeuristicConfig::default())
    }
}

impl std::fmt::Debug for OutlineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineEngine")
            .field("config", &self.config)
            .field("ocr_available", &self.ocr.is_available())
            .finish_non_exhaustive()
    }
}

impl OutlineEngine {
    /// Engine with script-based language tags and no OCR.
    pub fn new(config: HeuristicConfig) -> Self {
        Self {
            config,
            tagger: Box::new(ScriptTagger),
            ocr: Box::new(NoOcr),
        }
    }

    #[must_use]
    pub fn with_tagger(mut self, tagger: impl LanguageTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    #[must_use]
    pub fn with_ocr(mut self, ocr: impl OcrSource + 'static) -> Self {
        self.ocr = Box::new(ocr);
        self
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Normalize, cluster and language-tag raw runs.
    pub fn prepare(&self, raw: &[RawLine]) -> Vec<Line> {
        let lines = normalize_lines(raw, self.config.min_line_chars);
        let lines = assign_clusters(lines, self.config.cluster_radius);
        tag_lines(lines, self.tagger.as_ref())
    }

    /// Primary path: filter, classify and consolidate prepared lines.
    pub fn extract_outline(&self, lines: &[Line]) -> Vec<OutlineEntry> {
        let sizes: Vec<f32> = lines.iter().map(|line| line.size).collect();
        let candidates = CandidateFilter::new(&self.config, &sizes).filter(lines);
        let thresholds = Thresholds::from_sizes(&sizes);
        tracing::debug!(
            "Size bands h1={:.1} h2={:.1} h3={:.1}",
            thresholds.h1,
            thresholds.h2,
            thresholds.h3
        );

        let classified = classify_all(candidates, &thresholds, &self.config);
        build_outline(classified, &self.config)
    }

    /// Largest line on the earliest page, or the file name.
    pub fn extract_title(&self, lines: &[Line], file_name: &str) -> String {
        select_title(lines, file_name, self.config.min_title_chars)
    }

    /// Extract lines with `source` and build the document's outline.
    pub fn process(
        &self,
        path: &Path,
        source: &dyn LineSource,
        cancel: &CancelToken,
    ) -> OutlineResult<DocumentOutline> {
        cancel.check()?;
        let raw = source.extract_lines(path, cancel)?;
        tracing::debug!("Extracted {} runs from {}", raw.len(), path.display());
        self.process_lines(path, &raw, cancel)
    }

    /// Build the outline from already extracted runs. `path` names the
    /// document for the title fallback and the OCR pass.
    pub fn process_lines(
        &self,
        path: &Path,
        raw: &[RawLine],
        cancel: &CancelToken,
    ) -> OutlineResult<DocumentOutline> {
        cancel.check()?;
        let lines = self.prepare(raw);

        cancel.check()?;
        let mut outline = self.extract_outline(&lines);

        if outline.is_empty() {
            cancel.check()?;
            tracing::info!(
                "No headings detected via text extraction in {}, running OCR fallback",
                path.display()
            );
            outline = recognize_headings(
                self.ocr.as_ref(),
                path,
                &self.config,
                !lines.is_empty(),
                cancel,
            )?;
        }

        cancel.check()?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = self.extract_title(&lines, &file_name);

        Ok(DocumentOutline { title, outline })
    }
}
