//! Corpus inspection and statistics.
//!
//! Summarizes a written layout: staff geometry, how many pieces each staff
//! carries, the category distribution and why pieces were flagged.

mod report;

pub use report::{InspectReport, LabelCount, StaffRow, SummarySection};

use std::collections::HashMap;

use crate::corpus::Layout;

/// Options for corpus inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of top categories to show in the histogram.
    pub top_categories: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            top_categories: 10,
            bar_width: 20,
        }
    }
}

/// Inspect a layout and produce a report.
pub fn inspect_layout(layout: &Layout, opts: &InspectOptions) -> InspectReport {
    let staves: Vec<StaffRow> = layout
        .staff
        .iter()
        .enumerate()
        .map(|(index, staff)| StaffRow {
            index,
            x0: staff.x0,
            x1: staff.x1,
            y: staff.y,
            dy: staff.dy,
            nlines: staff.nlines,
            pieces: staff.piece.len(),
            flagged: staff.piece.iter().filter(|p| p.is_flagged()).count(),
        })
        .collect();

    let pieces = layout.staff.iter().flat_map(|s| &s.piece);

    let mut categories: HashMap<String, usize> = HashMap::new();
    let mut errors: HashMap<String, usize> = HashMap::new();
    let mut labelled = 0;
    for piece in pieces {
        *categories
            .entry(format!("{:?}", piece.ref1()))
            .or_insert(0) += 1;
        if piece.is_flagged() {
            *errors.entry(piece.piece_error.clone()).or_insert(0) += 1;
        }
        if !piece.name.is_empty() {
            labelled += 1;
        }
    }

    let summary = SummarySection {
        staves: staves.len(),
        pieces: staves.iter().map(|s| s.pieces).sum(),
        flagged: staves.iter().map(|s| s.flagged).sum(),
        labelled,
    };

    let (categories, other_categories) = top_counts(categories, opts.top_categories);
    let (errors, _) = top_counts(errors, usize::MAX);

    InspectReport {
        summary,
        staves,
        categories,
        other_categories,
        errors,
        bar_width: opts.bar_width,
    }
}

/// Sorts counts descending (then by label) and splits off everything past
/// the first `top_n` into a summed remainder.
fn top_counts(counts: HashMap<String, usize>, top_n: usize) -> (Vec<LabelCount>, usize) {
    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let rest: usize = sorted.iter().skip(top_n).map(|(_, count)| count).sum();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    (entries, rest)
}
