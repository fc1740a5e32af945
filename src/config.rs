//! Label map configuration.
//!
//! A label map is a small YAML or JSON file that tunes how a document is
//! labeled:
//!
//! ```yaml
//! renames:
//!   ff0000ff: tumor
//!   ff00ff00: stroma
//! labels:            # optional; replaces color discovery
//!   - { name: tumor, value: 1, color: "#ff0000ff" }
//! ```
//!
//! The format is picked by file extension (`.json` is JSON, anything else is
//! read as YAML).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::SlideLabelError;
use crate::ir::{Label, Labels};

/// Partial mapping from a label name to the name it should be stored under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelRenames(BTreeMap<String, String>);

impl LabelRenames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new name for `name`, if one is configured.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Renames `label` if a mapping exists, keeping its value and color.
    pub fn apply(&self, mut label: Label) -> Label {
        if let Some(renamed) = self.get(&label.name) {
            label.name = renamed.to_string();
        }
        label
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelRenames {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// On-disk label map.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelMapFile {
    #[serde(default)]
    pub renames: LabelRenames,

    #[serde(default)]
    pub labels: Option<Vec<Label>>,
}

impl LabelMapFile {
    /// Validates the `labels` section into a vocabulary, if present.
    pub fn vocabulary(&self) -> Result<Option<Labels>, SlideLabelError> {
        self.labels
            .as_ref()
            .map(|labels| Labels::create(labels.clone()))
            .transpose()
    }
}

/// Read a label map from a YAML or JSON file.
pub fn read_label_map(path: &Path) -> Result<LabelMapFile, SlideLabelError> {
    if !path.exists() {
        return Err(SlideLabelError::MissingSource {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(SlideLabelError::Io)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| SlideLabelError::LabelMapParse {
        path: path.to_path_buf(),
        message,
    })
}
