use std::path::PathBuf;
use thiserror::Error;

/// Failures reading from or writing to a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection not found: {0}")]
    MissingCollection(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode document {doc}: {source}")]
    Decode {
        doc: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode document {doc}: {source}")]
    Encode {
        doc: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
