//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! The ledger core never logs its failures; every condition below is
//! returned to the immediate caller.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A required element or field is missing
    #[error("Missing {field}")]
    InvalidElement { field: &'static str },

    /// An element was present but rejected by validation
    #[error("Validation error: {0}")]
    ValidationFailed(String),

    /// A 1-based position that does not exist in the list
    #[error("Position {position} is out of range (list has {len} entries)")]
    IndexOutOfRange { position: usize, len: usize },

    /// Attempt to mutate through a read-only view
    #[error("Unsupported mutation: {0}")]
    UnsupportedMutation(String),

    /// A failure attributed to one element of a batch (1-based position)
    #[error("Entry {position}: {source}")]
    InBatch {
        position: usize,
        #[source]
        source: Box<LedgerError>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// The command line could not be understood
    #[error("{0}")]
    Command(String),
}

impl LedgerError {
    /// Create a validation error from anything displayable
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    /// Attach a 1-based batch position to an error
    pub fn in_batch(position: usize, source: LedgerError) -> Self {
        Self::InBatch {
            position,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through batch wrappers
    pub fn root(&self) -> &LedgerError {
        match self {
            Self::InBatch { source, .. } => source.root(),
            other => other,
        }
    }

    /// Batch position of the offending element, if this came from a batch
    pub fn batch_position(&self) -> Option<usize> {
        match self {
            Self::InBatch { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Check if this is a missing-element error
    pub fn is_invalid_element(&self) -> bool {
        matches!(self.root(), Self::InvalidElement { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::ValidationFailed(_))
    }

    /// Check if this is an out-of-range position error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.root(), Self::IndexOutOfRange { .. })
    }

    /// Check if this is a read-only view violation
    pub fn is_unsupported_mutation(&self) -> bool {
        matches!(self.root(), Self::UnsupportedMutation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type LedgerResult<T> = Result<T, LedgerError>;
