//! Error types shared by the spatial motion core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("duration must be strictly positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("ping-pong requires loop to be enabled")]
    PingPongRequiresLoop,

    #[error("position has a non-finite coordinate: {0:?}")]
    NonFinitePosition(crate::Position),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type CoreResult<T> = Result<T, CoreError>;

/// Severity of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    /// Blocks the operation that produced it.
    Error,
    /// Surfaced to the caller but does not block.
    Warning,
}

/// A single structured validation problem.
///
/// Registration and parameter-edit validation collect these into a `Vec`
/// rather than failing on the first problem, so a caller (or a UI) can
/// show everything wrong with a submission at once.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"parameters.radius"`.
    pub path: String,
    /// Short machine-readable kind, e.g. `"out_of_range"`, `"duplicate_name"`.
    pub kind: String,
    pub severity: Severity,
    pub message: String,
}

impl ValidationError {
    pub fn error(path: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// True if any entry in `errors` is blocking.
pub fn has_blocking_errors(errors: &[ValidationError]) -> bool {
    errors.iter().any(|e| e.severity == Severity::Error)
}
