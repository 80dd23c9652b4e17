//! Response types for the Workday Balance Engine API.
//!
//! This module defines the success bodies that are not plain models, the
//! error response structures, and the mapping from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AuditStep, AuditWarning, BalanceReport, BalanceSign};

/// Response body for the `/balance/daily` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalanceResponse {
    /// The date of the record.
    pub date: NaiveDate,
    /// The direction of the balance.
    pub sign: BalanceSign,
    /// The magnitude of the balance in minutes.
    pub minutes: u32,
    /// The balance as `+HH:MM`, `-HH:MM` or `00:00`.
    pub formatted: String,
    /// The audit step documenting the calculation.
    pub audit_step: AuditStep,
    /// Warnings raised by the record.
    pub warnings: Vec<AuditWarning>,
}

/// Response body for the `/balance/months` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthsResponse {
    /// One report per month present in the input, most recent first.
    pub months: Vec<BalanceReport>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid time error naming the offending field.
    pub fn invalid_time(field: &str, value: &str) -> Self {
        Self::with_details(
            "INVALID_TIME",
            format!("The {} time format is invalid.", field),
            format!("Field '{}' received '{}', expected HH:MM", field, value),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidTime { field, value } => {
                Self::bad_request(ApiError::invalid_time(&field, &value))
            }
            EngineError::IncompleteRecord { date, pair } => {
                Self::bad_request(ApiError::with_details(
                    "INCOMPLETE_RECORD",
                    message,
                    format!(
                        "Set both arrival{pair} and leaving{pair} on {date}, or neither"
                    ),
                ))
            }
            EngineError::InvalidMonth { .. } => {
                Self::bad_request(ApiError::new("INVALID_MONTH", message))
            }
            EngineError::RateOverflow { .. } => {
                Self::bad_request(ApiError::validation_error(message))
            }
        }
    }
}
