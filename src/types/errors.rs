//! Error types used across treegrate.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::plan::SourceAction;

/// A structural plan defect. Validation aggregates every violation before any
/// mutation begins; each carries the offending entry's source path so the
/// whole plan can be fixed in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    ActionNotDefined { source: PathBuf },
    UnrecognizedAction { source: PathBuf, value: String },
    MissingTarget {
        source: PathBuf,
        action: SourceAction,
    },
    UnexpectedTarget {
        source: PathBuf,
        action: SourceAction,
    },
    TargetEqualsSource { source: PathBuf },
}

// Display/Error are implemented by hand because thiserror treats any field
// named `source` as the error source, and `PathBuf` is plain data here.
impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ActionNotDefined { source } => {
                write!(f, "{}: no action defined", source.display())
            }
            ValidationError::UnrecognizedAction { source, value } => {
                write!(f, "{}: unrecognized action '{value}'", source.display())
            }
            ValidationError::MissingTarget { source, action } => {
                write!(f, "{}: {action} requires a target", source.display())
            }
            ValidationError::UnexpectedTarget { source, action } => {
                write!(f, "{}: {action} does not take a target", source.display())
            }
            ValidationError::TargetEqualsSource { source } => {
                write!(f, "{}: target equals source", source.display())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// The offending entry's source path.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        match self {
            ValidationError::ActionNotDefined { source }
            | ValidationError::UnrecognizedAction { source, .. }
            | ValidationError::MissingTarget { source, .. }
            | ValidationError::UnexpectedTarget { source, .. }
            | ValidationError::TargetEqualsSource { source } => source,
        }
    }
}

/// High-level error categories for collaborator adapters.
#[derive(Debug, Copy, Clone, Error)]
pub enum ErrorKind {
    #[error("invalid plan data")]
    InvalidPlan,
    #[error("io error")]
    Io,
}

/// Structured adapter error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            msg: msg.into(),
        }
    }

    pub fn invalid_plan(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidPlan,
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io(e.to_string())
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
