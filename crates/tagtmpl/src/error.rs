//! Error handling for the tagtmpl binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for tagtmpl operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// The template file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The template did not compile.
    #[error("{}: {detail}", path.display())]
    Template {
        /// File the template came from.
        path: PathBuf,
        /// Error rendered with its source excerpt.
        detail: String,
    },
    /// The compiled configuration could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Render a template error against the text it was raised for.
    pub fn template(path: PathBuf, err: &template::Error, source: &str) -> Self {
        Self::Template {
            path,
            detail: err.pretty(source),
        }
    }
}
