//! Error types for the CLI layer.
//!
//! Analysis itself is total and never fails; errors only arise around it,
//! reading files and rendering output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeLensError {
    /// Reading an input file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown output format name
    #[error("unknown output format \"{0}\" (expected stylish, json, or github)")]
    UnknownFormat(String),

    /// Rendering JSON output failed
    #[error("failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, ComposeLensError>;
