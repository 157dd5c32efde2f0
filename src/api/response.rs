//! Response types for the Wage Engine API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::wages::{DaySummary, MonthSummary, YearSummary};

/// Body of `GET /years`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearsResponse {
    /// The supported years, ascending.
    pub years: Vec<i32>,
}

/// Body of `GET /tax/{year}/tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTablesResponse {
    /// The tax year.
    pub year: i32,
    /// The table names, sorted.
    pub tables: Vec<String>,
}

/// Body of `GET /tax/{year}/tables/{table}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTaxResponse {
    /// The tax year.
    pub year: i32,
    /// The table name.
    pub table: String,
    /// The queried monthly salary.
    pub salary: u64,
    /// The unrounded monthly tax.
    pub monthly_tax: Decimal,
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The id to address the session with.
    pub session_id: Uuid,
    /// The initial totals.
    pub summary: YearSummary,
}

/// Body of `PUT /sessions/{id}/days/{date}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayUpdateResponse {
    /// The edited day.
    pub day: DaySummary,
    /// The totals of the day's month.
    pub month: MonthSummary,
    /// The totals of the year.
    pub year: YearSummary,
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for an unreadable request body.
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
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::UnsupportedCountry { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::TaxTableParse { .. } | EngineError::InvalidTaxTable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TAX_TABLE_ERROR")
            }
            EngineError::UnknownTable { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_TABLE"),
            EngineError::UnknownYear { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_YEAR"),
            EngineError::UnsupportedYear { .. } => (StatusCode::BAD_REQUEST, "UNSUPPORTED_YEAR"),
            EngineError::InvalidHours { .. } => (StatusCode::BAD_REQUEST, "INVALID_HOURS"),
            EngineError::DayNotInYear { .. } => (StatusCode::BAD_REQUEST, "DAY_NOT_IN_YEAR"),
            EngineError::SessionNotFound { .. } => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            EngineError::SessionLimitReached { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "SESSION_LIMIT_REACHED")
            }
        };

        let error = match error {
            EngineError::UnknownTable { year, name } => ApiError::with_details(
                code,
                message,
                format!("Table '{}' is not among the tables loaded for {}", name, year),
            ),
            EngineError::InvalidHours { .. } => {
                ApiError::with_details(code, message, "Hours must be between 0 and 24")
            }
            _ => ApiError::new(code, message),
        };

        ApiErrorResponse { status, error }
    }
}
