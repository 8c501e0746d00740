//! Unified error types for linepack.
//!
//! The error surface is narrow. Malformed transcript lines never
//! produce errors: the line classifier absorbs every ambiguous shape into either
//! "new message" or "continuation". What remains are I/O failures, output
//! serialization failures and invalid user-supplied configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for linepack operations.
///
/// # Example
///
/// ```rust
/// use linepack::error::Result;
/// use linepack::Record;
///
/// fn load() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, LinepackError>;

/// The error type for all linepack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinepackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input transcript doesn't exist or can't be read
    /// - The output file can't be created or written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An I/O error tied to a specific file.
    #[error("IO error on {}: {source}", path.display())]
    File {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization or deserialization error.
    ///
    /// Raised when writing JSON/JSONL output or loading a config document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configuration value is unusable.
    #[error("Invalid config field '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An unknown or unavailable output format was requested.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LinepackError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LinepackError::File {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid config error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        LinepackError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        LinepackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        LinepackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error (with or without a path).
    pub fn is_io(&self) -> bool {
        matches!(self, LinepackError::Io(_) | LinepackError::File { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, LinepackError::InvalidConfig { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, LinepackError::InvalidDate { .. })
    }
}
