//! Style clustering over (font size, vertical position).
//!
//! Density grouping with a minimum cluster size of one: every line lands in a
//! cluster, and two lines share one when a chain of neighbors within the
//! radius connects them. The ids are an advisory grouping signal; nothing in
//! the classifier branches on them.

use crate::line::Line;
use std::cmp::Ordering;

/// Assign a `cluster_id` to every line, ids numbered in order of each
/// cluster's first member.
pub fn assign_clusters(lines: Vec<Line>, radius: f32) -> Vec<Line> {
    let labels = cluster_labels(&lines, radius);
    lines
        .into_iter()
        .zip(labels)
        .map(|(line, label)| line.with_cluster(label))
        .collect()
}

/// Cluster label per line, expanding each seed breadth-first through its
/// radius neighborhood.
///
/// Neighbors are looked up in a y-sorted index, so each expansion only scans
/// lines whose vertical offset is within the radius.
pub fn cluster_labels(lines: &[Line], radius: f32) -> Vec<usize> {
    let mut by_y: Vec<usize> = (0..lines.len()).collect();
    by_y.sort_by(|&a, &b| {
        lines[a]
            .y_position
            .partial_cmp(&lines[b].y_position)
            .unwrap_or(Ordering::Equal)
    });

    let mut labels: Vec<Option<usize>> = vec![None; lines.len()];
    let mut next_label = 0;

    for seed in 0..lines.len() {
        if labels[seed].is_some() {
            continue;
        }

        labels[seed] = Some(next_label);
        let mut frontier = vec![seed];
        let mut cursor = 0;
        while cursor < frontier.len() {
            let current = &lines[frontier[cursor]];
            let low = current.y_position - radius;
            let high = current.y_position + radius;
            let first = by_y.partition_point(|&idx| lines[idx].y_position < low);

            for &idx in by_y[first..]
                .iter()
                .take_while(|&&idx| lines[idx].y_position <= high)
            {
                if labels[idx].is_some() {
                    continue;
                }
                if feature_distance(current, &lines[idx]) <= radius {
                    labels[idx] = Some(next_label);
                    frontier.push(idx);
                }
            }
            cursor += 1;
        }

        next_label += 1;
    }

    tracing::debug!("Style clustering: {} lines in {} clusters", lines.len(), next_label);

    labels.into_iter().map(|label| label.unwrap_or(0)).collect()
}

fn feature_distance(a: &Line, b: &Line) -> f32 {
    let dx = a.size - b.size;
    let dy = a.y_position - b.y_position;
    (dx * dx + dy * dy).sqrt()
}
