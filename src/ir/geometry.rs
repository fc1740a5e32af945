//! Conversion of annotation rings into `geo` polygons, and the area and
//! containment queries hole resolution needs.
//!
//! Rings are implicitly closed (the last vertex connects back to the first)
//! and may be wound in either direction.

use geo::{Area, Contains, LineString, Polygon};

use super::coord::Coord;

/// Converts a ring into a `geo` line string; `Polygon::new` closes it.
pub fn to_line_string<S>(ring: &[Coord<S>]) -> LineString<f64> {
    ring.iter()
        .map(|c| geo::Coord { x: c.x, y: c.y })
        .collect::<Vec<_>>()
        .into()
}

/// Builds a polygon from an outer ring and its holes.
pub fn to_polygon<S>(outer: &[Coord<S>], holes: &[Vec<Coord<S>>]) -> Polygon<f64> {
    Polygon::new(
        to_line_string(outer),
        holes.iter().map(|hole| to_line_string(hole)).collect(),
    )
}

/// Absolute area of a ring.
///
/// Rings with fewer than three vertices have zero area.
pub fn ring_area<S>(ring: &[Coord<S>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    to_polygon(ring, &[]).unsigned_area()
}

/// True for rings that bound a finite region of non-zero area.
pub fn is_areal<S>(ring: &[Coord<S>]) -> bool {
    ring.len() >= 3 && ring.iter().all(Coord::is_finite) && ring_area(ring) > 0.0
}

/// Returns true if the region bounded by `inner` lies entirely within the
/// polygon `outer` minus `holes`.
///
/// Shared boundary is allowed; reaching into a hole or outside the outer
/// ring is not. Degenerate or non-finite rings never take part.
pub fn polygon_contains<S>(outer: &[Coord<S>], holes: &[Vec<Coord<S>>], inner: &[Coord<S>]) -> bool {
    if !is_areal(outer) || !is_areal(inner) || !holes.iter().all(|hole| is_areal(hole)) {
        return false;
    }
    to_polygon(outer, holes).contains(&to_polygon(inner, &[]))
}
