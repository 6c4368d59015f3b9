//! Document title selection.

use crate::line::Line;
use std::cmp::Ordering;

/// Pick the largest line, earliest page first among equals, falling back to
/// `file_name` when there is none or its text is shorter than `min_chars`.
pub fn select_title(lines: &[Line], file_name: &str, min_chars: usize) -> String {
    let best = lines.iter().reduce(|best, line| {
        match line
            .size
            .partial_cmp(&best.size)
            .unwrap_or(Ordering::Equal)
            .then_with(|| best.page.cmp(&line.page))
        {
            Ordering::Greater => line,
            _ => best,
        }
    });

    match best {
        Some(line) if line.text.chars().count() >= min_chars => line.text.clone(),
        _ => file_name.to_string(),
    }
}
