//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between coordinates as written in a slide document and coordinates after
//! the caller's linear scale factor has been applied.

use std::fmt;

/// Marker type for slide coordinates exactly as written in the document.
///
/// For Sedeen documents these are level-0 pixel positions on the slide.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {}

/// Marker type for coordinates multiplied by the parse scale factor.
///
/// Every coordinate stored on an [`Annotation`](super::Annotation) lives in
/// this space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scaled {}

impl fmt::Debug for Slide {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Scaled {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
