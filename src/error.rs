//! Error types for icon rendering and export.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rendering and export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting icons.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested canvas size cannot be allocated.
    #[error("invalid icon size: {0}")]
    InvalidSize(u32),

    /// The export plan is inconsistent (zero size, duplicate path, ...).
    #[error("invalid export plan: {0}")]
    InvalidPlan(String),

    /// A directory or file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    /// An export plan could not be (de)serialized.
    #[error("failed to (de)serialize export plan: {0}")]
    Plan(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
