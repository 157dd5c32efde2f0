//! HTTP API module for the Wage Engine.
//!
//! This module provides the REST API endpoints for browsing calendars,
//! looking up monthly withholding tax and editing per-session working hours.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CreateSessionRequest, SalaryQuery, SetHoursRequest};
pub use response::{
    ApiError, ApiErrorResponse, DayUpdateResponse, MonthlyTaxResponse, SessionResponse,
    TaxTablesResponse, YearsResponse,
};
pub use state::AppState;
