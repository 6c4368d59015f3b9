//! Line feature store.
//!
//! A [`RawLine`] is what the extraction backend yields for one styled text run.
//! [`Line`] is the normalized record the inference stages work on; each
//! enrichment stage hands back a new `Line` rather than editing a shared one.

use crate::text;
use serde::{Deserialize, Serialize};

/// Horizontal placement of a line on its page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// One styled text run as produced by an extraction backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    #[serde(default)]
    pub font: String,
    /// Packed `0xRRGGBB`.
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub alignment: Alignment,
    /// 1-based page number.
    pub page: usize,
    /// Page-local vertical coordinate, larger is higher on the page.
    pub y_position: f32,
}

impl RawLine {
    /// Convenience constructor for a left-aligned run in a default font.
    pub fn new(text: impl Into<String>, size: f32, bold: bool, page: usize, y_position: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            font: String::new(),
            color: 0,
            alignment: Alignment::Left,
            page,
            y_position,
        }
    }

    #[must_use]
    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }
}

/// Language tag used when identification is unavailable or fails.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A normalized text line with its visual features.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Font size rounded to one decimal.
    pub size: f32,
    pub bold: bool,
    pub alignment: Alignment,
    pub page: usize,
    pub y_position: f32,
    /// Style band from the clusterer; advisory only.
    pub cluster_id: Option<usize>,
    pub language_tag: String,
}

impl Line {
    /// Normalize a raw run, dropping it when the cleaned text is shorter than
    /// `min_chars` characters.
    pub fn from_raw(raw: &RawLine, min_chars: usize) -> Option<Self> {
        let cleaned = text::normalize(&raw.text);
        if cleaned.chars().count() < min_chars {
            return None;
        }
        Some(Self {
            text: cleaned,
            size: text::round_size(raw.size),
            bold: raw.bold,
            alignment: raw.alignment,
            page: raw.page,
            y_position: raw.y_position,
            cluster_id: None,
            language_tag: UNKNOWN_LANGUAGE.to_string(),
        })
    }

    #[must_use]
    pub fn with_cluster(self, cluster_id: usize) -> Self {
        Self {
            cluster_id: Some(cluster_id),
            ..self
        }
    }

    #[must_use]
    pub fn with_language(self, language_tag: impl Into<String>) -> Self {
        Self {
            language_tag: language_tag.into(),
            ..self
        }
    }

    pub fn is_centered(&self) -> bool {
        self.alignment == Alignment::Center
    }
}

/// Normalize a batch of raw runs in extraction order.
pub fn normalize_lines(raw: &[RawLine], min_chars: usize) -> Vec<Line> {
    raw.iter()
        .filter_map(|line| Line::from_raw(line, min_chars))
        .collect()
}
