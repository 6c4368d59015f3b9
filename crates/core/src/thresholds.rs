//! Document-adaptive size bands.

use serde::Serialize;
use std::cmp::Ordering;

/// Sizes closer than this are the same size (sizes carry one decimal).
pub(crate) const SIZE_EPSILON: f32 = 1e-3;

pub(crate) fn same_size(a: f32, b: f32) -> bool {
    (a - b).abs() < SIZE_EPSILON
}

/// The three largest distinct font sizes, zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Thresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl Thresholds {
    pub fn new(h1: f32, h2: f32, h3: f32) -> Self {
        Self { h1, h2, h3 }
    }

    /// Derive the bands from a size multiset. Only the distinct values matter.
    pub fn from_sizes(sizes: &[f32]) -> Self {
        let distinct = distinct_sizes_desc(sizes);
        let band = |idx: usize| distinct.get(idx).copied().unwrap_or(0.0);
        Self {
            h1: band(0),
            h2: band(1),
            h3: band(2),
        }
    }

    /// True when `size` is one of the (non-empty) bands.
    pub fn is_band(&self, size: f32) -> bool {
        [self.h1, self.h2, self.h3]
            .into_iter()
            .any(|band| band > 0.0 && same_size(band, size))
    }
}

/// Distinct sizes, largest first. NaN sizes are ignored.
pub fn distinct_sizes_desc(sizes: &[f32]) -> Vec<f32> {
    let mut sorted: Vec<f32> = sizes.iter().copied().filter(|s| !s.is_nan()).collect();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    sorted.dedup_by(|a, b| same_size(*a, *b));
    sorted
}

/// Upper median (`sorted[len / 2]`), 0 for no sizes.
pub fn median_size(sizes: &[f32]) -> f32 {
    if sizes.is_empty() {
        return 0.0;
    }
    let mut sorted = sizes.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted[sorted.len() / 2]
}
