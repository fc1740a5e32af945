//! Core annotation model for parsed slide documents.
//!
//! Format readers produce a [`SlideAnnotations`]: the label vocabulary of the
//! document plus an ordered, densely indexed list of annotations.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coord::Coord;
use super::geometry::{polygon_contains, ring_area};
use super::ids::AnnotationIndex;
use super::label::{Label, Labels};
use super::space::Scaled;

/// A ring of scaled coordinates.
pub type Ring = Vec<Coord<Scaled>>;

/// Geometry type of an annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    Point,
    Polygon,
}

impl AnnotationType {
    /// Lowercase name, as used in output and for label type overrides.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationType::Point => "point",
            AnnotationType::Polygon => "polygon",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of parsing one slide document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SlideAnnotations {
    /// Vocabulary the annotations were labeled with.
    pub labels: Labels,

    /// Annotations ordered by index.
    pub annotations: Vec<Annotation>,
}

/// A geometric annotation with an optional label and holes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Dense position in the output; stable across rewrites.
    pub index: AnnotationIndex,

    #[serde(rename = "type")]
    pub kind: AnnotationType,

    /// Outer boundary (polygons) or point positions (points).
    pub coordinates: Ring,

    /// Resolved label, or `None` when the pen color was not in the vocabulary.
    pub label: Option<Label>,

    /// Interior regions subtracted from the outer boundary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Ring>,
}

impl Annotation {
    /// Creates a new annotation without holes.
    pub fn new(
        index: impl Into<AnnotationIndex>,
        kind: AnnotationType,
        coordinates: Ring,
        label: Option<Label>,
    ) -> Self {
        Self {
            index: index.into(),
            kind,
            coordinates,
            label,
            holes: Vec::new(),
        }
    }

    /// Planar area: outer ring minus holes for polygons, zero for points.
    pub fn area(&self) -> f64 {
        match self.kind {
            AnnotationType::Point => 0.0,
            AnnotationType::Polygon => {
                let holes: f64 = self.holes.iter().map(|hole| ring_area(hole)).sum();
                (ring_area(&self.coordinates) - holes).max(0.0)
            }
        }
    }

    /// Returns true if the whole of `other` lies within this annotation's
    /// area.
    ///
    /// Only polygons take part: points have no area to hold or to cut out.
    /// Touching boundaries are allowed, partial overlap is not, and `other`
    /// may not reach into any hole.
    pub fn contains(&self, other: &Annotation) -> bool {
        self.kind == AnnotationType::Polygon
            && other.kind == AnnotationType::Polygon
            && polygon_contains(&self.coordinates, &self.holes, &other.coordinates)
    }
}
