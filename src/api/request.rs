//! Request types for the Wage Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// The year to edit.
    pub year: i32,
}

/// Request body for `PUT /sessions/{id}/days/{date}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetHoursRequest {
    /// The hours worked on the day.
    pub hours: Decimal,
}

/// Query string for `GET /tax/{year}/tables/{table}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryQuery {
    /// The monthly salary.
    pub salary: u64,
}
