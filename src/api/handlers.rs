//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_payroll, dashboard_overview, next_id_from_ids, resolve_payslip, salary_trend, summarize,
};
use crate::models::{PayrollReport, RosterKind, YearMonth, decode_roster, record_id};

use super::request::{DashboardRequest, NextIdRequest, PayrollRequest, PayslipRequest, TrendRequest};
use super::response::{ApiError, ApiErrorResponse, NextIdResponse, RosterOptions};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/trend", post(trend_handler))
        .route("/payslip", post(payslip_handler))
        .route("/next-id", post(next_id_handler))
        .route("/dashboard", post(dashboard_handler))
        .route("/rosters/:kind", get(roster_options_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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

    Err(ApiErrorResponse::bad_request(error))
}

/// Handler for POST /payroll.
///
/// Computes line items and bucket totals for one roster snapshot.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let config = state.config();
    let roster_config = config.roster(request.roster);

    let (employees, decode_diagnostics) = decode_roster(request.employees);
    let computation = compute_payroll(
        &employees,
        &request.filters,
        roster_config,
        config.organisation(),
    );
    let summary = summarize(&computation.items, &roster_config.summary_buckets);
    let report = PayrollReport::new(request.roster, computation, summary)
        .with_leading_diagnostics(decode_diagnostics);

    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        roster = %report.roster,
        employees = employees.len(),
        items = report.items.len(),
        diagnostics = report.diagnostics.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll computed"
    );

    json_ok(report)
}

/// Handler for POST /trend.
async fn trend_handler(payload: Result<Json<TrendRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let (teaching, _) = decode_roster(request.teaching);
    let (non_teaching, _) = decode_roster(request.non_teaching);
    let anchor = request
        .anchor_month
        .unwrap_or_else(|| YearMonth::from_date(Local::now().date_naive()));

    let trend = salary_trend(&teaching, &non_teaching, anchor);
    info!(correlation_id = %correlation_id, anchor = %anchor, "Salary trend computed");

    json_ok(trend)
}

/// Handler for POST /payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    if let Some(saved) = &request.saved {
        if let Err(err) = saved.validate() {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.id,
                error = %err,
                "Rejected saved payslip values"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    }

    let payslip = resolve_payslip(
        &request.employee,
        request.saved.as_ref(),
        state.config().payslip_template(),
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %payslip.employee_id,
        net_pay = %payslip.net_pay,
        "Payslip resolved"
    );

    json_ok(payslip)
}

/// Handler for POST /next-id.
async fn next_id_handler(
    State(state): State<AppState>,
    payload: Result<Json<NextIdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let prefix = request
        .prefix
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(state.config().organisation().id_prefix.as_str());

    // Ids of entries that fail to decode are still taken
    let id = next_id_from_ids(request.employees.iter().filter_map(record_id), prefix);

    json_ok(NextIdResponse { id })
}

/// Handler for POST /dashboard.
async fn dashboard_handler(payload: Result<Json<DashboardRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let (teaching, _) = decode_roster(request.teaching);
    let (non_teaching, _) = decode_roster(request.non_teaching);
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    json_ok(dashboard_overview(&teaching, &non_teaching, today))
}

/// Handler for GET /rosters/:kind.
///
/// Returns the role, department and designation choices for a roster.
async fn roster_options_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    let roster_kind = match kind.parse::<RosterKind>() {
        Ok(roster_kind) => roster_kind,
        Err(_) => {
            warn!(kind = %kind, "Unknown roster requested");
            return ApiErrorResponse::bad_request(ApiError::invalid_roster(&kind)).into_response();
        }
    };

    let roster = state.config().roster(roster_kind);
    json_ok(RosterOptions {
        kind: roster_kind,
        label: roster_kind.label().to_string(),
        role_options: roster.role_options(),
        departments: roster.departments.clone(),
        designations: roster.designations.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/school").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_payroll_valid_request_returns_200() {
        let body = json!({
            "roster": "non-teaching",
            "employees": [{
                "id": "EMP001", "name": "A", "department": "",
                "designation": "Clerk", "salary": 10000, "hireDate": "2024-01-01"
            }],
            "filters": {"role": "all"}
        });

        let (status, report) = post_json("/payroll", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["items"][0]["deductions"], "1000");
        assert_eq!(report["items"][0]["net_pay"], "9000");
        assert_eq!(report["items"][0]["role"], "Administrative");
        assert_eq!(report["items"][0]["department"], "N/A");
        assert_eq!(report["summary"]["buckets"][0]["total_gross"], "10000");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, error) = post_json("/payroll", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_roster_returns_validation_error() {
        let (status, error) = post_json("/payroll", r#"{"employees": []}"#.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_next_id_uses_configured_prefix() {
        let body = json!({"employees": [{"id": "EMP001", "name": "A", "hire_date": "2024-01-01"},
                                        {"id": "EMP003", "name": "B", "hire_date": "2024-01-01"}]});
        let (status, response) = post_json("/next-id", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["id"], "EMP004");
    }

    #[tokio::test]
    async fn test_negative_saved_payslip_returns_400() {
        let body = json!({
            "employee": {"id": "EMP001", "name": "A", "salary": 50000, "hire_date": "2024-01-01"},
            "saved": {"hra": -5}
        });
        let (status, error) = post_json("/payslip", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "INVALID_PAYSLIP");
    }
}
