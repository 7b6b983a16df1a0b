//! Error types for the Premium Leave Engine.
//!
//! Only configuration loading and validation can fail with an error. Problems
//! found in spreadsheet data (unparsable dates, unreadable schedules, missing
//! names) are reported as values so that one malformed row never aborts a batch.

use thiserror::Error;

/// The main error type for the Premium Leave Engine.
///
/// # Example
///
/// ```
/// use premium_leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/thresholds.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/thresholds.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Urgency thresholds were loaded but are internally inconsistent.
    #[error("Invalid urgency thresholds: {message}")]
    InvalidThresholds {
        /// A description of the inconsistency.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
