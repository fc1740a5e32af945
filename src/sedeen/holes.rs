//! Annular hole resolution.
//!
//! Shapes drawn with the annular marker color come in concentric pairs: the
//! inner shape outlines a region cut out of the outer one. Resolution pairs
//! them greedily, largest outer first, attaches the inner ring as a hole of
//! the outer annotation and relabels the inner annotation as `Rest`.
//!
//! Each outer takes at most one hole and is never re-queued, so for three
//! nested shapes A ⊃ B ⊃ C only A/B is paired and C stays as drawn.
//!
//! Only polygons pair. Marker-colored points have no area and are reported
//! as unresolved.

use serde::Serialize;

use crate::ir::{Annotation, AnnotationIndex, Label};

/// One outer/inner pairing made during resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HolePair {
    pub outer: AnnotationIndex,
    pub inner: AnnotationIndex,
}

/// What hole resolution did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HoleSummary {
    /// Pairings in the order they were made.
    pub pairs: Vec<HolePair>,
    /// Candidates that found no partner and were left unchanged.
    pub unresolved: Vec<AnnotationIndex>,
}

/// Pair annular candidates into outer-with-hole / `Rest` inner annotations.
///
/// `annotations` is addressed by index (`annotations[i].index == i`); stray
/// or repeated candidate indices are ignored.
pub fn resolve_holes(
    mut annotations: Vec<Annotation>,
    candidates: &[AnnotationIndex],
) -> (Vec<Annotation>, HoleSummary) {
    let mut queue: Vec<(AnnotationIndex, f64)> = Vec::with_capacity(candidates.len());
    for &index in candidates {
        let addressable = annotations
            .get(index.as_usize())
            .is_some_and(|ann| ann.index == index);
        if addressable && !queue.iter().any(|(queued, _)| *queued == index) {
            queue.push((index, annotations[index.as_usize()].area()));
        }
    }

    // Stable, so equal areas keep document order.
    queue.sort_by(|a, b| b.1.total_cmp(&a.1));
    let mut queue: Vec<AnnotationIndex> = queue.into_iter().map(|(index, _)| index).collect();

    let mut summary = HoleSummary::default();
    while !queue.is_empty() {
        let outer = queue.remove(0);
        let found = queue.iter().position(|inner| {
            annotations[outer.as_usize()].contains(&annotations[inner.as_usize()])
        });

        let Some(pos) = found else {
            log::debug!("annular candidate {outer} has no contained partner");
            summary.unresolved.push(outer);
            continue;
        };

        let inner = queue.remove(pos);
        let hole = annotations[inner.as_usize()].coordinates.clone();
        annotations[outer.as_usize()].holes.push(hole);
        annotations[inner.as_usize()].label = Some(Label::rest());

        log::debug!("annotation {inner} becomes a hole of annotation {outer}");
        summary.pairs.push(HolePair { outer, inner });
    }

    (annotations, summary)
}
