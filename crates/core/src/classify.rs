//! Heading level assignment.

use crate::config::HeuristicConfig;
use crate::line::Line;
use crate::text;
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outline heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    H1,
    H2,
    H3,
}

impl Level {
    /// Numeric depth, 1 for `H1`.
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A candidate line with its assigned level.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub line: Line,
    pub level: Level,
}

/// Assign a level to one candidate; tiers are tried H1 first.
pub fn classify(line: &Line, thresholds: &Thresholds, config: &HeuristicConfig) -> Option<Level> {
    let caps = text::is_caps_like(&line.text);
    let centered = line.is_centered();
    let near_top = line.y_position > config.top_of_page_y;

    if line.size >= thresholds.h1 && (line.bold || centered || caps || near_top) {
        return Some(Level::H1);
    }
    if line.size >= thresholds.h2 && (line.bold || centered || caps) {
        return Some(Level::H2);
    }
    if line.size >= thresholds.h3 && (caps || line.bold) {
        return Some(Level::H3);
    }
    None
}

/// Classify every candidate, dropping the ones without a level.
pub fn classify_all(
    candidates: Vec<Line>,
    thresholds: &Thresholds,
    config: &HeuristicConfig,
) -> Vec<ClassifiedLine> {
    candidates
        .into_iter()
        .filter_map(|line| {
            classify(&line, thresholds, config).map(|level| ClassifiedLine { line, level })
        })
        .collect()
}
