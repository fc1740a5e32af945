//! Slide inspection and statistics.
//!
//! Summarizes a parsed slide: geometry counts, the label distribution
//! (including `Rest` and unlabeled shapes) and what annular hole resolution
//! did.

mod report;

pub use report::{HolesSection, InspectReport, LabelCount, SummarySection, MAX_BAR_WIDTH};

use std::collections::BTreeMap;

use crate::ir::{AnnotationType, SlideAnnotations};
use crate::sedeen::ParseOutcome;

/// Options for slide inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

/// Inspect a parse outcome and produce a report.
pub fn inspect_outcome(outcome: &ParseOutcome, opts: &InspectOptions) -> InspectReport {
    let mut report = inspect_annotations(&outcome.slide, opts);
    report.summary.duplicates_dropped = outcome.duplicates_dropped;
    report.holes.pairs = outcome.holes.pairs.clone();
    report.holes.unresolved = outcome.holes.unresolved.clone();
    report
}

/// Inspect parsed annotations.
///
/// Hole pairings are only known to the parser, so the returned report lists
/// hole counts but no pairs; use [`inspect_outcome`] for those.
pub fn inspect_annotations(slide: &SlideAnnotations, opts: &InspectOptions) -> InspectReport {
    let annotations = &slide.annotations;

    let summary = SummarySection {
        annotations: annotations.len(),
        points: annotations
            .iter()
            .filter(|a| a.kind == AnnotationType::Point)
            .count(),
        polygons: annotations
            .iter()
            .filter(|a| a.kind == AnnotationType::Polygon)
            .count(),
        vocabulary: slide.labels.len(),
        unlabeled: annotations.iter().filter(|a| a.label.is_none()).count(),
        duplicates_dropped: 0,
    };

    InspectReport {
        summary,
        labels: compute_labels(slide),
        holes: HolesSection {
            polygons_with_holes: annotations.iter().filter(|a| !a.holes.is_empty()).count(),
            total_holes: annotations.iter().map(|a| a.holes.len()).sum(),
            ..Default::default()
        },
        bar_width: opts.bar_width,
    }
}

/// Per-label counts, sorted by count descending, then by name.
fn compute_labels(slide: &SlideAnnotations) -> Vec<LabelCount> {
    let mut counts: BTreeMap<(&str, u32), usize> = BTreeMap::new();
    for label in slide.annotations.iter().filter_map(|a| a.label.as_ref()) {
        *counts
            .entry((label.name.as_str(), label.value.as_u32()))
            .or_insert(0) += 1;
    }

    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|((label, value), count)| LabelCount {
            label: label.to_string(),
            value,
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}
