use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, validating, or extracting from a spec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The referenced local file does not exist.
    #[error("specification file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Unrecognized extension, malformed JSON/YAML, or an unusable URL.
    #[error("format error: {0}")]
    Format(String),

    /// Well-formed document that is structurally invalid, or no document loaded.
    #[error("validation error: {0}")]
    Validation(String),

    /// Network failure, timeout, or non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O error reading an existing spec file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error category, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Format,
    Validation,
    Transport,
    Io,
}

impl SpecError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpecError::NotFound(_) => ErrorKind::NotFound,
            SpecError::Format(_) => ErrorKind::Format,
            SpecError::Validation(_) => ErrorKind::Validation,
            SpecError::Transport(_) => ErrorKind::Transport,
            SpecError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn not_loaded() -> Self {
        SpecError::Validation("no specification loaded".into())
    }
}
