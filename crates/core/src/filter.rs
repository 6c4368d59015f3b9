//! Heading candidate filter.
//!
//! Rejects lines that cannot be headings (boilerplate, form rows, sentences)
//! and keeps the rest when at least one typographic cue backs them up.

use crate::config::HeuristicConfig;
use crate::line::Line;
use crate::text;
use crate::thresholds::{median_size, Thresholds};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Page markers, form labels, closings, bare numbers and copyright lines.
    static ref BOILERPLATE: Regex = Regex::new(
        r"(?i)^(page(\s+\d+(\s+of\s+\d+)?)?|\d+|thank\s?you|copyright\b.*|©.*|all rights reserved|name|date|signature|address|form|no\.|reg\.|roll|age|relationship|s\.no)$"
    )
    .unwrap();
}

/// True for lines that are page furniture rather than content.
pub fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE.is_match(text.trim())
}

/// Candidate filter bound to one document's size statistics.
#[derive(Debug, Clone)]
pub struct CandidateFilter<'a> {
    config: &'a HeuristicConfig,
    median_size: f32,
    bands: Thresholds,
}

impl<'a> CandidateFilter<'a> {
    /// Build a filter from every line's size in the document.
    pub fn new(config: &'a HeuristicConfig, sizes: &[f32]) -> Self {
        Self {
            config,
            median_size: median_size(sizes),
            bands: Thresholds::from_sizes(sizes),
        }
    }

    pub fn median_size(&self) -> f32 {
        self.median_size
    }

    /// Walk lines in extraction order and keep the heading candidates.
    ///
    /// The spacing cue compares each line with the line extracted just before
    /// it, whether or not that line was kept.
    pub fn filter(&self, lines: &[Line]) -> Vec<Line> {
        let mut candidates = Vec::new();
        let mut previous_y = None;

        for line in lines {
            if self.passes_gate(line) && self.is_candidate(line, previous_y) {
                candidates.push(line.clone());
            }
            previous_y = Some(line.y_position);
        }

        tracing::debug!(
            "Candidate filter kept {} of {} lines (median size {:.1})",
            candidates.len(),
            lines.len(),
            self.median_size
        );
        candidates
    }

    /// Cheap gate: large enough or emphasized, and in a top size band or bold.
    pub fn passes_gate(&self, line: &Line) -> bool {
        let min_size = self.median_size * self.config.prefilter_size_ratio;
        let visible = line.size >= min_size || line.bold || line.is_centered();
        visible && (self.bands.is_band(line.size) || line.bold)
    }

    /// Rejection rules first, then at least one cue and a size at or above the
    /// median.
    pub fn is_candidate(&self, line: &Line, previous_y: Option<f32>) -> bool {
        let text = line.text.as_str();

        if is_boilerplate(text) {
            return false;
        }

        let words = text::word_count(text);
        if words > self.config.max_heading_words {
            return false;
        }
        if text.ends_with(['.', ',', ':']) {
            return false;
        }
        if text::punctuation_count(text) > self.config.max_punctuation {
            return false;
        }
        if text::digit_count(text) > self.config.max_digits {
            return false;
        }

        let emphasized_size = self.median_size * self.config.short_fragment_size_ratio;
        if words < 2 && line.size <= emphasized_size && !line.bold {
            return false;
        }

        let spacing_ok = previous_y
            .map(|y| (line.y_position - y).abs() >= self.config.min_heading_spacing)
            .unwrap_or(true);
        let has_cue =
            line.bold || line.is_centered() || text::is_caps_like(text) || spacing_ok;

        has_cue && line.size >= self.median_size
    }
}
