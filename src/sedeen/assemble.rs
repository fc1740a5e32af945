//! Annotation assembly: scaling, renaming, indexing and deduplication.

use std::collections::HashSet;

use super::extract::RawRecord;
use crate::config::LabelRenames;
use crate::ir::{Annotation, AnnotationIndex, AnnotationType, Label};

/// Label name (pen color without `#`) marking annular hole candidates.
pub const ANNULAR_MARKER: &str = "ff00ff00";

/// Output of an [`Assembler`].
#[derive(Clone, Debug, Default)]
pub struct Assembled {
    /// Deduplicated annotations; `annotations[i].index == i`.
    pub annotations: Vec<Annotation>,
    /// Indices whose label carried [`ANNULAR_MARKER`] before renaming.
    pub annular_candidates: Vec<AnnotationIndex>,
    /// Records discarded as exact duplicates of an earlier annotation.
    pub duplicates_dropped: usize,
}

/// Exact, hashable identity of an annotation's content (everything but the
/// index).
#[derive(PartialEq, Eq, Hash)]
struct ShapeKey {
    kind: AnnotationType,
    coordinates: Vec<(u64, u64)>,
    label: Option<Label>,
    holes: Vec<Vec<(u64, u64)>>,
}

impl ShapeKey {
    fn of(annotation: &Annotation) -> Self {
        Self {
            kind: annotation.kind,
            coordinates: annotation.coordinates.iter().map(|c| c.key_bits()).collect(),
            label: annotation.label.clone(),
            holes: annotation
                .holes
                .iter()
                .map(|hole| hole.iter().map(|c| c.key_bits()).collect())
                .collect(),
        }
    }
}

/// Turns labeled raw records into a densely indexed annotation list.
///
/// The assembler is the only place annotation indices are handed out.
pub struct Assembler<'r> {
    scale: f64,
    renames: &'r LabelRenames,
    seen: HashSet<ShapeKey>,
    out: Assembled,
}

impl<'r> Assembler<'r> {
    pub fn new(scale: f64, renames: &'r LabelRenames) -> Self {
        Self {
            scale,
            renames,
            seen: HashSet::new(),
            out: Assembled::default(),
        }
    }

    /// Adds one record with its resolved label.
    ///
    /// Returns the assigned index, or `None` if the record duplicated an
    /// annotation already accepted.
    pub fn push(&mut self, record: RawRecord, label: Option<Label>) -> Option<AnnotationIndex> {
        let coordinates = record
            .coordinates
            .into_iter()
            .map(|c| c.scale(self.scale))
            .collect();

        let annular = label
            .as_ref()
            .is_some_and(|label| label.name == ANNULAR_MARKER);
        let label = label.map(|label| self.renames.apply(label));

        let index = AnnotationIndex::new(self.out.annotations.len());
        let annotation = Annotation::new(index, record.kind, coordinates, label);

        if !self.seen.insert(ShapeKey::of(&annotation)) {
            log::debug!(
                "dropping duplicate {} with {} coordinate(s)",
                annotation.kind,
                annotation.coordinates.len()
            );
            self.out.duplicates_dropped += 1;
            return None;
        }

        if annular {
            self.out.annular_candidates.push(index);
        }
        self.out.annotations.push(annotation);
        Some(index)
    }

    pub fn finish(self) -> Assembled {
        self.out
    }
}

/// Assemble a whole stream of labeled records in one call.
pub fn assemble_annotations<I>(records: I, scale: f64, renames: &LabelRenames) -> Assembled
where
    I: IntoIterator<Item = (RawRecord, Option<Label>)>,
{
    let mut assembler = Assembler::new(scale, renames);
    for (record, label) in records {
        assembler.push(record, label);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Coord, Slide};

    fn record(kind: AnnotationType, points: &[(f64, f64)]) -> RawRecord {
        RawRecord {
            kind,
            coordinates: points.iter().map(|&(x, y)| Coord::<Slide>::new(x, y)).collect(),
            color: None,
        }
    }

    fn marker() -> Option<Label> {
        Some(Label::with_color(ANNULAR_MARKER, 1u32, "#ff00ff00"))
    }

    fn tumor() -> Option<Label> {
        Some(Label::with_color("ff0000ff", 2u32, "#ff0000ff"))
    }

    #[test]
    fn scales_coordinates() {
        let out = assemble_annotations(
            [(record(AnnotationType::Point, &[(1.0, 1.0)]), None)],
            2.0,
            &LabelRenames::new(),
        );
        assert_eq!(out.annotations[0].coordinates, vec![Coord::new(2.0, 2.0)]);
    }

    #[test]
    fn assigns_dense_indices_and_drops_duplicates() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let out = assemble_annotations(
            [
                (record(AnnotationType::Polygon, &square), tumor()),
                (record(AnnotationType::Polygon, &square), tumor()),
                (record(AnnotationType::Polygon, &square), None),
                (record(AnnotationType::Point, &[(5.0, 5.0)]), tumor()),
            ],
            1.0,
            &LabelRenames::new(),
        );

        let indices: Vec<_> = out.annotations.iter().map(|a| a.index.as_usize()).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(out.duplicates_dropped, 1);
        assert_eq!(out.annotations[1].label, None);
    }

    #[test]
    fn duplicates_compare_after_scaling() {
        let out = assemble_annotations(
            [
                (record(AnnotationType::Point, &[(1.0, 1.0)]), None),
                (record(AnnotationType::Point, &[(1.0, 1.0)]), None),
            ],
            0.5,
            &LabelRenames::new(),
        );
        assert_eq!(out.annotations.len(), 1);
    }

    #[test]
    fn marks_annular_candidates_before_rename() {
        let renames: LabelRenames = [(ANNULAR_MARKER, "annulus")].into_iter().collect();
        let out = assemble_annotations(
            [
                (record(AnnotationType::Polygon, &[(0.0, 0.0)]), tumor()),
                (record(AnnotationType::Polygon, &[(1.0, 1.0)]), marker()),
                (record(AnnotationType::Polygon, &[(1.0, 1.0)]), marker()),
                (record(AnnotationType::Polygon, &[(2.0, 2.0)]), marker()),
            ],
            1.0,
            &renames,
        );

        assert_eq!(
            out.annular_candidates,
            [AnnotationIndex(1), AnnotationIndex(2)]
        );
        assert_eq!(
            out.annotations[1].label.as_ref().map(|l| l.name.as_str()),
            Some("annulus")
        );
    }

    #[test]
    fn renamed_marker_is_not_a_candidate() {
        let renames: LabelRenames = [("ff0000ff", ANNULAR_MARKER)].into_iter().collect();
        let out = assemble_annotations(
            [(record(AnnotationType::Polygon, &[(0.0, 0.0)]), tumor())],
            1.0,
            &renames,
        );
        assert!(out.annular_candidates.is_empty());
    }
}
