use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while allocating numbers or producing receipts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillingError {
    /// The counter store could not be read or written.
    #[error("counter store {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination folder or the output file could not be written,
    /// or the document could not be serialized.
    #[error("render error for {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },

    /// The record handed to the core is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

impl BillingError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines.0.label").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
