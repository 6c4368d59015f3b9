//! Heuristic parameters for heading inference.
//!
//! Every cutoff used by the filter, classifier and consolidator lives here as a
//! named default so a deployment can recalibrate through a config file instead
//! of touching the inference code.

use crate::error::{OutlineError, OutlineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runs shorter than this (in characters) are dropped at normalization.
pub const MIN_LINE_CHARS: usize = 3;
/// A selected title shorter than this falls back to the file name.
pub const MIN_TITLE_CHARS: usize = 5;
/// Neighborhood radius for style clustering over (size, y).
pub const CLUSTER_RADIUS: f32 = 2.0;
/// Headings are short: more words than this reads as body text.
pub const MAX_HEADING_WORDS: usize = 14;
/// Sentences carry punctuation; headings rarely more than two marks.
pub const MAX_PUNCTUATION: usize = 2;
/// Rows with more digits than this are form fields or tables.
pub const MAX_DIGITS: usize = 6;
/// Single-word lines need this size ratio over the median (or bold).
pub const SHORT_FRAGMENT_SIZE_RATIO: f32 = 1.2;
/// Vertical gap from the previous line that counts as heading spacing.
pub const MIN_HEADING_SPACING: f32 = 20.0;
/// Pre-filter: lines below this fraction of the median need bold or centering.
pub const PREFILTER_SIZE_RATIO: f32 = 0.9;
/// Lines above this y (PDF user space) sit near the top of the page.
pub const TOP_OF_PAGE_Y: f32 = 700.0;
/// Fragments of one heading differ in size by less than this.
pub const MERGE_SIZE_TOLERANCE: f32 = 0.5;
/// Fragments of one heading sit closer than this vertically.
pub const MERGE_MAX_GAP: f32 = 100.0;
/// OCR lines with more words than this are not headings.
pub const OCR_MAX_WORDS: usize = 12;

/// Tunable cutoffs for the inference pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub min_line_chars: usize,
    pub min_title_chars: usize,
    pub cluster_radius: f32,
    pub max_heading_words: usize,
    pub max_punctuation: usize,
    pub max_digits: usize,
    pub short_fragment_size_ratio: f32,
    pub min_heading_spacing: f32,
    pub prefilter_size_ratio: f32,
    pub top_of_page_y: f32,
    pub merge_size_tolerance: f32,
    pub merge_max_gap: f32,
    pub ocr_max_words: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_line_chars: MIN_LINE_CHARS,
            min_title_chars: MIN_TITLE_CHARS,
            cluster_radius: CLUSTER_RADIUS,
            max_heading_words: MAX_HEADING_WORDS,
            max_punctuation: MAX_PUNCTUATION,
            max_digits: MAX_DIGITS,
            short_fragment_size_ratio: SHORT_FRAGMENT_SIZE_RATIO,
            min_heading_spacing: MIN_HEADING_SPACING,
            prefilter_size_ratio: PREFILTER_SIZE_RATIO,
            top_of_page_y: TOP_OF_PAGE_Y,
            merge_size_tolerance: MERGE_SIZE_TOLERANCE,
            merge_max_gap: MERGE_MAX_GAP,
            ocr_max_words: OCR_MAX_WORDS,
        }
    }
}

impl HeuristicConfig {
    /// Load overrides from a JSON or YAML file (chosen by extension).
    ///
    /// Fields missing from the file keep their defaults.
    pub fn from_path(path: &Path) -> OutlineResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            OutlineError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config: Self = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&source).map_err(|e| {
                OutlineError::config(format!("Invalid YAML in {}: {}", path.display(), e))
            })?,
            Some("json") => serde_json::from_str(&source).map_err(|e| {
                OutlineError::config(format!("Invalid JSON in {}: {}", path.display(), e))
            })?,
            _ => {
                return Err(OutlineError::config(format!(
                    "Unsupported config format for {} (expected .json, .yaml or .yml)",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> OutlineResult<()> {
        let ratios = [
            ("cluster_radius", self.cluster_radius),
            ("short_fragment_size_ratio", self.short_fragment_size_ratio),
            ("prefilter_size_ratio", self.prefilter_size_ratio),
            ("merge_size_tolerance", self.merge_size_tolerance),
            ("merge_max_gap", self.merge_max_gap),
            ("min_heading_spacing", self.min_heading_spacing),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(OutlineError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.top_of_page_y.is_finite() {
            return Err(OutlineError::config("top_of_page_y must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = HeuristicConfig::default();
        assert_eq!(config.max_heading_words, 14);
        assert_eq!(config.max_digits, 6);
        assert!((config.top_of_page_y - 700.0).abs() < f32::EPSILON);
        assert!((config.merge_max_gap - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let file = write_temp(".json", r#"{ "max_heading_words": 10 }"#);
        let config = HeuristicConfig::from_path(file.path()).unwrap();
        assert_eq!(config.max_heading_words, 10);
        assert_eq!(config.ocr_max_words, OCR_MAX_WORDS);
    }

    #[test]
    fn test_yaml_config() {
        let file = write_temp(".yaml", "top_of_page_y: 650.0\nmerge_max_gap: 80.0\n");
        let config = HeuristicConfig::from_path(file.path()).unwrap();
        assert!((config.top_of_page_y - 650.0).abs() < f32::EPSILON);
        assert!((config.merge_max_gap - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let file = write_temp(".toml", "max_digits = 4");
        let err = HeuristicConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, OutlineError::Config(_)));
    }

    #[test]
    fn test_rejects_negative_ratio() {
        let file = write_temp(".json", r#"{ "prefilter_size_ratio": -1.0 }"#);
        let err = HeuristicConfig::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("prefilter_size_ratio"));
    }
}
