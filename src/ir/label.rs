//! Labels and the per-document label vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::LabelValue;
use crate::error::SlideLabelError;

/// Name of the synthetic label given to inner shapes consumed as holes.
pub const REST_LABEL_NAME: &str = "Rest";

/// A named class label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Unique name within a vocabulary.
    pub name: String,

    /// Integer class value.
    pub value: LabelValue,

    /// Pen color this label was discovered from, if any (e.g. `#ff00ff00`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Label {
    /// Creates a new label without a color.
    pub fn new(name: impl Into<String>, value: impl Into<LabelValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            color: None,
        }
    }

    /// Creates a new label carrying its source color.
    pub fn with_color(
        name: impl Into<String>,
        value: impl Into<LabelValue>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            color: Some(color.into()),
        }
    }

    /// The synthetic `Rest` label (value 0).
    pub fn rest() -> Self {
        Self::new(REST_LABEL_NAME, LabelValue::REST)
    }

    /// Returns true if this is the synthetic `Rest` label.
    pub fn is_rest(&self) -> bool {
        self.value == LabelValue::REST && self.name == REST_LABEL_NAME
    }
}

/// An immutable label vocabulary with lookup by name.
///
/// Serialized as a plain list of labels in vocabulary order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct Labels {
    entries: Vec<Label>,
    by_name: BTreeMap<String, usize>,
}

impl Labels {
    /// Builds a vocabulary from a list of labels.
    ///
    /// Fails if two labels share a name or a label claims the value reserved
    /// for `Rest`.
    pub fn create(labels: Vec<Label>) -> Result<Self, SlideLabelError> {
        let mut by_name = BTreeMap::new();
        for (pos, label) in labels.iter().enumerate() {
            if label.value == LabelValue::REST {
                return Err(SlideLabelError::InvalidVocabulary(format!(
                    "label '{}' uses value {}, which is reserved for '{REST_LABEL_NAME}'",
                    label.name,
                    LabelValue::REST
                )));
            }
            if by_name.insert(label.name.clone(), pos).is_some() {
                return Err(SlideLabelError::InvalidVocabulary(format!(
                    "duplicate label name '{}'",
                    label.name
                )));
            }
        }

        Ok(Self {
            entries: labels,
            by_name,
        })
    }

    /// Builds a vocabulary from labels already known to have unique names
    /// and non-reserved values.
    pub(crate) fn from_unique(labels: Vec<Label>) -> Self {
        let by_name = labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label.name.clone(), pos))
            .collect();
        Self {
            entries: labels,
            by_name,
        }
    }

    /// Looks up a label by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Label> {
        self.by_name.get(name).map(|&pos| &self.entries[pos])
    }

    /// Label names in vocabulary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|label| label.name.as_str())
    }

    /// Labels in vocabulary order.
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Label>> for Labels {
    type Error = SlideLabelError;

    fn try_from(labels: Vec<Label>) -> Result<Self, Self::Error> {
        Labels::create(labels)
    }
}

impl From<Labels> for Vec<Label> {
    fn from(labels: Labels) -> Self {
        labels.entries
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
