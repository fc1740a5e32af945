use std::path::PathBuf;
use thiserror::Error;

/// The main error type for slidelabel operations.
#[derive(Debug, Error)]
pub enum SlideLabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Annotation file not found: {path}")]
    MissingSource { path: PathBuf },

    #[error("Failed to parse Sedeen XML from {path}: {message}")]
    SedeenXmlParse { path: PathBuf, message: String },

    #[error("Unsupported annotation type '{kind}' in {graphic} of {path}")]
    UnsupportedType {
        path: PathBuf,
        graphic: String,
        kind: String,
    },

    #[error("Invalid label vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Failed to read label map from {path}: {message}")]
    LabelMapParse { path: PathBuf, message: String },

    #[error("Failed to write annotation JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
