//! Newtype identifiers for annotations and labels.
//!
//! Using newtypes prevents accidentally mixing up an annotation's position in
//! the output with a label's class value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an annotation in the parsed output.
///
/// Indices are assigned densely from zero as annotations survive
/// deduplication and never change afterwards, even when the annotation is
/// rewritten during hole resolution.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationIndex(pub usize);

impl AnnotationIndex {
    /// Creates a new AnnotationIndex.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying position.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for AnnotationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationIndex({})", self.0)
    }
}

impl fmt::Display for AnnotationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<usize> for AnnotationIndex {
    fn from(index: usize) -> Self {
        AnnotationIndex::new(index)
    }
}

/// Integer class value of a label.
///
/// Discovered labels are numbered from 1; 0 belongs to the synthetic
/// `Rest` label.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelValue(pub u32);

impl LabelValue {
    /// The value reserved for the `Rest` label.
    pub const REST: LabelValue = LabelValue(0);

    /// Creates a new LabelValue.
    #[inline]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying u32 value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelValue({})", self.0)
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for LabelValue {
    fn from(value: u32) -> Self {
        LabelValue::new(value)
    }
}
