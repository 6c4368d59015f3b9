//! Outline consolidation: noise removal, ordering and re-joining headings that
//! the extractor split over several visual lines.

use crate::classify::{ClassifiedLine, Level};
use crate::config::HeuristicConfig;
use crate::line::Alignment;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const NOISE_HEADINGS: [&str; 2] = ["contents", "table of contents"];

/// One heading in the final outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: Level,
    pub text: String,
    pub page: usize,
}

/// A heading together with the style of its first fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingGroup {
    pub level: Level,
    pub text: String,
    pub page: usize,
    pub size: f32,
    pub bold: bool,
    pub alignment: Alignment,
    pub y_position: f32,
}

impl From<ClassifiedLine> for HeadingGroup {
    fn from(classified: ClassifiedLine) -> Self {
        let ClassifiedLine { line, level } = classified;
        Self {
            level,
            text: line.text,
            page: line.page,
            size: line.size,
            bold: line.bold,
            alignment: line.alignment,
            y_position: line.y_position,
        }
    }
}

impl HeadingGroup {
    fn continues(&self, next: &Self, config: &HeuristicConfig) -> bool {
        self.page == next.page
            && self.level == next.level
            && (self.size - next.size).abs() < config.merge_size_tolerance
            && self.bold == next.bold
            && self.alignment == next.alignment
            && (self.y_position - next.y_position).abs() < config.merge_max_gap
    }

    pub fn to_entry(&self) -> OutlineEntry {
        OutlineEntry {
            level: self.level,
            text: self.text.clone(),
            page: self.page,
        }
    }
}

/// Too short to be a heading, or a table-of-contents caption.
pub fn is_noise(text: &str, min_chars: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < min_chars {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    NOISE_HEADINGS.contains(&lowered.as_str())
}

/// Order headings top to bottom and merge wrapped fragments.
///
/// A fragment joins the current group when it matches the group's first
/// fragment in page, level and style and sits within the merge gap of it.
pub fn consolidate(headings: Vec<HeadingGroup>, config: &HeuristicConfig) -> Vec<HeadingGroup> {
    let mut sorted: Vec<HeadingGroup> = headings
        .into_iter()
        .filter(|heading| !is_noise(&heading.text, config.min_line_chars))
        .collect();
    sorted.sort_by(|a, b| {
        a.page.cmp(&b.page).then_with(|| {
            b.y_position
                .partial_cmp(&a.y_position)
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut merged: Vec<HeadingGroup> = Vec::new();
    for heading in sorted {
        if let Some(current) = merged.last_mut() {
            if current.continues(&heading, config) {
                current.text.push(' ');
                current.text.push_str(heading.text.trim());
                continue;
            }
        }
        merged.push(heading);
    }

    merged
}

/// Consolidate classified candidates into outline entries.
pub fn build_outline(classified: Vec<ClassifiedLine>, config: &HeuristicConfig) -> Vec<OutlineEntry> {
    let groups = classified.into_iter().map(HeadingGroup::from).collect();
    consolidate(groups, config)
        .iter()
        .map(HeadingGroup::to_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str, level: Level, page: usize, size: f32, y: f32) -> HeadingGroup {
        HeadingGroup {
            level,
            text: text.to_string(),
            page,
            size,
            bold: true,
            alignment: Alignment::Left,
            y_position: y,
        }
    }

    #[test]
    fn test_merges_wrapped_heading() {
        let config = HeuristicConfig::default();
        let out = consolidate(
            vec![
                heading("Quarterly Results for", Level::H1, 1, 18.0, 700.0),
                heading("the Northern Region", Level::H1, 1, 18.3, 660.0),
            ],
            &config,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Quarterly Results for the Northern Region");
        assert!((out[0].size - 18.0).abs() < f32::EPSILON);
        assert!((out[0].y_position - 700.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_style_breaks_merge() {
        let config = HeuristicConfig::default();
        let mut plain = heading("Second Heading", Level::H1, 1, 18.0, 650.0);
        plain.bold = false;
        let out = consolidate(
            vec![
                heading("First Heading", Level::H1, 1, 18.0, 700.0),
                plain,
                heading("Other Level", Level::H2, 1, 18.0, 600.0),
                heading("Far Below", Level::H2, 1, 18.0, 400.0),
                heading("Next Page", Level::H2, 2, 18.0, 780.0),
            ],
            &config,
        );
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_sorts_by_page_then_top_down() {
        let config = HeuristicConfig::default();
        let out = consolidate(
            vec![
                heading("Lower On Two", Level::H2, 2, 14.0, 100.0),
                heading("Top Of Two", Level::H1, 2, 18.0, 760.0),
                heading("Only On One", Level::H1, 1, 18.0, 300.0),
            ],
            &config,
        );
        let texts: Vec<&str> = out.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, ["Only On One", "Top Of Two", "Lower On Two"]);
    }

    #[test]
    fn test_drops_noise() {
        let config = HeuristicConfig::default();
        let out = consolidate(
            vec![
                heading("Table of Contents", Level::H1, 1, 18.0, 700.0),
                heading("CONTENTS", Level::H1, 2, 18.0, 700.0),
                heading(" ab ", Level::H2, 3, 14.0, 500.0),
                heading("Scope", Level::H2, 3, 14.0, 300.0),
            ],
            &config,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Scope");
    }

    #[test]
    fn test_merge_is_anchored_on_first_fragment() {
        let config = HeuristicConfig::default();
        // 60 + 60: the third fragment is 120 below the first one.
        let out = consolidate(
            vec![
                heading("Part One", Level::H1, 1, 18.0, 700.0),
                heading("Part Two", Level::H1, 1, 18.0, 640.0),
                heading("Part Three", Level::H1, 1, 18.0, 580.0),
            ],
            &config,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "Part One Part Two");
        assert_eq!(out[1].text, "Part Three");
    }

    #[test]
    fn test_consolidation_is_idempotent() {
        let config = HeuristicConfig::default();
        let input = vec![
            heading("Part One", Level::H1, 1, 18.0, 700.0),
            heading("Part Two", Level::H1, 1, 18.0, 640.0),
            heading("Part Three", Level::H1, 1, 18.0, 580.0),
            heading("Details", Level::H2, 1, 14.0, 500.0),
            heading("Closing Notes", Level::H2, 2, 14.0, 700.0),
        ];
        let once = consolidate(input, &config);
        let twice = consolidate(once.clone(), &config);
        assert_eq!(once, twice);
    }
}
