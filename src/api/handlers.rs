//! HTTP request handlers for the Wage Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::CalendarYear;
use crate::wages::{DaySummary, YearSummary};

use super::request::{CreateSessionRequest, SalaryQuery, SetHoursRequest};
use super::response::{
    ApiError, ApiErrorResponse, DayUpdateResponse, MonthlyTaxResponse, SessionResponse,
    TaxTablesResponse, YearsResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/years", get(years_handler))
        .route("/calendar/:year", get(calendar_handler))
        .route("/tax/:year/tables", get(tax_tables_handler))
        .route("/tax/:year/tables/:table", get(monthly_tax_handler))
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/:id",
            get(session_handler).delete(close_session_handler),
        )
        .route("/sessions/:id/days/:date", put(set_hours_handler))
        .with_state(state)
}

/// Logs a failed request and converts the error into a response.
fn reject(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    err.into()
}

fn path_error(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Invalid path parameter"
    );
    ApiErrorResponse::bad_request(ApiError::new("INVALID_PATH", rejection.body_text()))
}

fn json_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for GET /years.
async fn years_handler(State(state): State<AppState>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: state.config().years(),
    })
}

/// Handler for GET /calendar/:year.
async fn calendar_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> ApiResult<CalendarYear> {
    let correlation_id = Uuid::new_v4();
    let Path(year) = year.map_err(|rejection| path_error(correlation_id, rejection))?;
    info!(correlation_id = %correlation_id, year, "Fetching calendar");

    let calendar = state
        .config()
        .calendar_for(year)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(calendar.clone()))
}

/// Handler for GET /tax/:year/tables.
async fn tax_tables_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> ApiResult<TaxTablesResponse> {
    let correlation_id = Uuid::new_v4();
    let Path(year) = year.map_err(|rejection| path_error(correlation_id, rejection))?;
    info!(correlation_id = %correlation_id, year, "Listing tax tables");

    let tables = state
        .config()
        .table_names(year)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(TaxTablesResponse {
        year,
        tables: tables.into_iter().map(str::to_string).collect(),
    }))
}

/// Handler for GET /tax/:year/tables/:table?salary=N.
async fn monthly_tax_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, String)>, PathRejection>,
    query: Result<Query<SalaryQuery>, QueryRejection>,
) -> ApiResult<MonthlyTaxResponse> {
    let correlation_id = Uuid::new_v4();
    let Path((year, table)) = path.map_err(|rejection| path_error(correlation_id, rejection))?;
    let Query(SalaryQuery { salary }) = query.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid salary query"
        );
        ApiErrorResponse::bad_request(ApiError::new("VALIDATION_ERROR", rejection.body_text()))
    })?;

    let monthly_tax = state
        .config()
        .monthly_tax(year, &table, salary)
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        year,
        table = %table,
        salary,
        monthly_tax = %monthly_tax,
        "Monthly tax looked up"
    );
    Ok(Json(MonthlyTaxResponse {
        year,
        table,
        salary,
        monthly_tax,
    }))
}

/// Handler for POST /sessions.
///
/// Opens a wage session on a fresh copy of the requested year.
async fn create_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> ApiResult<SessionResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let session_id = state
        .open_session(request.year)
        .map_err(|err| reject(correlation_id, err))?;
    let summary = state
        .with_session(session_id, |year| Ok(year.summary()))
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        year = request.year,
        "Session opened"
    );
    Ok(Json(SessionResponse {
        session_id,
        summary,
    }))
}

/// Handler for GET /sessions/:id.
async fn session_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<YearSummary> {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|rejection| path_error(correlation_id, rejection))?;

    let summary = state
        .with_session(id, |year| Ok(year.summary()))
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(summary))
}

/// Handler for DELETE /sessions/:id.
async fn close_session_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|rejection| path_error(correlation_id, rejection))?;

    state
        .close_session(id)
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        session_id = %id,
        open_sessions = state.session_count(),
        "Session closed"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT /sessions/:id/days/:date.
///
/// Sets the hours of one day and returns the updated day, month and year
/// totals.
async fn set_hours_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, NaiveDate)>, PathRejection>,
    payload: Result<Json<SetHoursRequest>, JsonRejection>,
) -> ApiResult<DayUpdateResponse> {
    let correlation_id = Uuid::new_v4();
    let Path((id, date)) = path.map_err(|rejection| path_error(correlation_id, rejection))?;
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let response = state
        .with_session(id, |year| {
            let day = DaySummary::from(year.set_hours(date, request.hours)?);
            // set_hours succeeded, so the date's month is present
            let month = year.months()[date.month0() as usize].summary();
            Ok(DayUpdateResponse {
                day,
                month,
                year: year.summary(),
            })
        })
        .map_err(|err| reject(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %id,
        date = %date,
        hours = %request.hours,
        day_type = %response.day.day_type,
        "Hours updated"
    );
    Ok(Json(response))
}
