//! Integration tests for the Wage Engine API.
//!
//! This test suite drives the router against the Norwegian sample
//! configuration and covers:
//! - Supported years and calendar browsing
//! - Tax table listing and monthly tax lookups
//! - Session creation and hour editing
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use wage_engine::api::{AppState, create_router};
use wage_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/norway").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value.as_str().expect("decimal serialized as string");
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn send_json(router: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn open_session(router: Router, year: i32) -> String {
    let (status, body) = send_json(router, "POST", "/sessions", json!({ "year": year })).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    body["session_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Years and calendars
// =============================================================================

#[tokio::test]
async fn test_years_lists_configured_years() {
    let (status, body) = get(create_router_for_test(), "/years").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"], json!([2023, 2024]));
}

#[tokio::test]
async fn test_calendar_2023_has_every_day() {
    let (status, body) = get(create_router_for_test(), "/calendar/2023").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2023);
    assert_eq!(body["country_code"], "NO");

    let months = body["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);

    let days: Vec<&Value> = months
        .iter()
        .flat_map(|m| m["days"].as_array().unwrap())
        .collect();
    assert_eq!(days.len(), 365);
    assert_eq!(days[0]["date"], "2023-01-01");
    assert_eq!(days[364]["date"], "2023-12-31");

    let workdays = days
        .iter()
        .filter(|d| d["classification"] == "workday")
        .count();
    assert_eq!(workdays, 251);
}

#[tokio::test]
async fn test_calendar_marks_constitution_day() {
    let (_, body) = get(create_router_for_test(), "/calendar/2023").await;

    let may = &body["months"][4];
    assert_eq!(may["name"], "May");

    let may_17 = &may["days"][16];
    assert_eq!(may_17["date"], "2023-05-17");
    assert_eq!(may_17["holiday"], true);
    assert_eq!(may_17["classification"], "off_day");
}

#[tokio::test]
async fn test_calendar_leap_year() {
    let (status, body) = get(create_router_for_test(), "/calendar/2024").await;

    assert_eq!(status, StatusCode::OK);
    let february = body["months"][1]["days"].as_array().unwrap();
    assert_eq!(february.len(), 29);
}

#[tokio::test]
async fn test_calendar_unknown_year_returns_404() {
    let (status, body) = get(create_router_for_test(), "/calendar/1999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_YEAR");
}

// =============================================================================
// Tax tables
// =============================================================================

#[tokio::test]
async fn test_tax_tables_listed_sorted() {
    let (status, body) = get(create_router_for_test(), "/tax/2023/tables").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2023);
    assert_eq!(body["tables"], json!(["7100", "7101"]));
}

#[tokio::test]
async fn test_monthly_tax_inside_table() {
    let (status, body) = get(create_router_for_test(), "/tax/2023/tables/7100?salary=6000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["table"], "7100");
    assert_eq!(body["salary"], 6000);
    assert_decimal(&body["monthly_tax"], "22");
}

#[tokio::test]
async fn test_monthly_tax_below_first_threshold_is_zero() {
    let (_, body) = get(create_router_for_test(), "/tax/2023/tables/7100?salary=100").await;

    assert_decimal(&body["monthly_tax"], "0");
}

#[tokio::test]
async fn test_monthly_tax_extrapolates_above_table() {
    // 154 + (6600 - 6500) * 0.54
    let (_, body) = get(create_router_for_test(), "/tax/2023/tables/7100?salary=6600").await;

    assert_decimal(&body["monthly_tax"], "208");
}

#[tokio::test]
async fn test_monthly_tax_per_year_tables() {
    let (_, body) = get(create_router_for_test(), "/tax/2024/tables/7100?salary=6000").await;

    assert_decimal(&body["monthly_tax"], "21");
}

#[tokio::test]
async fn test_unknown_table_returns_404() {
    let (status, body) = get(create_router_for_test(), "/tax/2023/tables/9999?salary=6000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_TABLE");
    assert!(body["details"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn test_dropped_table_is_unknown() {
    // 6300 only carries two-week rows
    let (status, _) = get(create_router_for_test(), "/tax/2023/tables/6300?salary=6000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tax_for_unknown_year_returns_404() {
    let (status, body) = get(create_router_for_test(), "/tax/2030/tables").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_YEAR");
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_create_session_returns_initial_summary() {
    let (status, body) = send_json(
        create_router_for_test(),
        "POST",
        "/sessions",
        json!({ "year": 2023 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["session_id"].is_string());

    let summary = &body["summary"];
    assert_eq!(summary["year"], 2023);
    assert_eq!(summary["work_days"], 251);
    assert_eq!(summary["off_days"], 114);
    assert_eq!(summary["vacation_days"], 0);
    assert_decimal(&summary["total_hours"], "1882.5");
    assert_eq!(summary["months"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_create_session_for_unknown_year_returns_404() {
    let (status, body) = send_json(
        create_router_for_test(),
        "POST",
        "/sessions",
        json!({ "year": 2031 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_YEAR");
}

#[tokio::test]
async fn test_zero_hours_on_workday_is_vacation() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    // 2023-03-01 is a Wednesday
    let (status, body) = send_json(
        router.clone(),
        "PUT",
        &format!("/sessions/{}/days/2023-03-01", id),
        json!({ "hours": "0" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"]["day_type"], "vacation");
    assert_eq!(body["month"]["month"], 3);
    assert_eq!(body["month"]["work_days"], 22);
    assert_eq!(body["month"]["vacation_days"], 1);
    assert_decimal(&body["month"]["total_hours"], "165");
    assert_decimal(&body["year"]["total_hours"], "1875");

    // Restoring hours makes it a workday again
    let (_, body) = send_json(
        router.clone(),
        "PUT",
        &format!("/sessions/{}/days/2023-03-01", id),
        json!({ "hours": "7.5" }),
    )
    .await;
    assert_eq!(body["day"]["day_type"], "workday");
    assert_eq!(body["year"]["vacation_days"], 0);

    let (status, summary) = get(router, &format!("/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal(&summary["total_hours"], "1882.5");
}

#[tokio::test]
async fn test_hours_on_holiday_stay_off_day() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let (status, body) = send_json(
        router,
        "PUT",
        &format!("/sessions/{}/days/2023-05-17", id),
        json!({ "hours": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"]["day_type"], "off_day");
    assert_decimal(&body["day"]["hours"], "5");
    assert_eq!(body["year"]["off_days"], 114);
    assert_decimal(&body["year"]["total_hours"], "1887.5");
}

#[tokio::test]
async fn test_negative_hours_rejected_and_state_unchanged() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let (status, body) = send_json(
        router.clone(),
        "PUT",
        &format!("/sessions/{}/days/2023-03-01", id),
        json!({ "hours": "-1" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_HOURS");

    let (_, summary) = get(router, &format!("/sessions/{}", id)).await;
    assert_decimal(&summary["total_hours"], "1882.5");
    assert_eq!(summary["work_days"], 251);
}

#[tokio::test]
async fn test_date_outside_session_year_returns_400() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let (status, body) = send_json(
        router,
        "PUT",
        &format!("/sessions/{}/days/2024-01-02", id),
        json!({ "hours": "7.5" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DAY_NOT_IN_YEAR");
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let router = create_router_for_test();
    let first = open_session(router.clone(), 2023).await;
    let second = open_session(router.clone(), 2023).await;

    send_json(
        router.clone(),
        "PUT",
        &format!("/sessions/{}/days/2023-03-01", first),
        json!({ "hours": "0" }),
    )
    .await;

    let (_, summary) = get(router, &format!("/sessions/{}", second)).await;
    assert_eq!(summary["vacation_days"], 0);
}

#[tokio::test]
async fn test_unknown_session_returns_404() {
    let (status, body) = get(
        create_router_for_test(),
        "/sessions/6f1c2b1e-3a52-4c1e-9d36-0f2f2a9f8a11",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_hours_returns_validation_error() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let (status, body) = send_json(
        router,
        "PUT",
        &format!("/sessions/{}/days/2023-03-01", id),
        json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_hours_above_full_day_rejected_and_session_still_readable() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let max = Decimal::MAX.to_string();
    for date in ["2023-03-01", "2023-03-02"] {
        let (status, body) = send_json(
            router.clone(),
            "PUT",
            &format!("/sessions/{}/days/{}", id, date),
            json!({ "hours": max }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_HOURS");
    }

    let (status, summary) = get(router, &format!("/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal(&summary["total_hours"], "1882.5");
}

#[tokio::test]
async fn test_delete_session_frees_it() {
    let router = create_router_for_test();
    let id = open_session(router.clone(), 2023).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/sessions/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, body) = get(router, &format!("/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn test_session_limit_returns_429() {
    // The listed fixture allows two open sessions
    let config = ConfigLoader::load("./config/fixtures/listed").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    open_session(router.clone(), 2023).await;
    open_session(router.clone(), 2023).await;

    let (status, body) =
        send_json(router, "POST", "/sessions", json!({ "year": 2023 })).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "SESSION_LIMIT_REACHED");
}
