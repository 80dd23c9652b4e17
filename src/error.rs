//! Error types for the Workday Balance Engine.
//!
//! The balance and aggregation functions are total and never fail. Errors
//! come from the layers around them: configuration loading, textual clock
//! input, month selection and the incomplete-pair policy. Overtime pay fails
//! only when an hourly rate is too large to price.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Workday Balance Engine.
///
/// # Example
///
/// ```
/// use workday_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     field: "arrival1".to_string(),
///     value: "8:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "The arrival1 time format is invalid.");
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

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending value.
        message: String,
    },

    /// A textual clock field did not match the `HH:MM` format.
    #[error("The {field} time format is invalid.")]
    InvalidTime {
        /// The name of the field that failed validation.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A record had an arrival without a leaving (or the reverse).
    #[error("Incomplete record on {date}: pair {pair} has only one side set")]
    IncompleteRecord {
        /// The date of the record.
        date: NaiveDate,
        /// The 1-based position of the half-filled pair.
        pair: usize,
    },

    /// A month string was not a valid `YYYY-MM` value.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// Pricing overtime at the given hourly rate overflowed.
    #[error("Hourly rate {hourly_rate} is too large to calculate overtime pay")]
    RateOverflow {
        /// The rejected rate.
        hourly_rate: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
