//! HTTP request handlers for the Workday Balance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_month_with_audit, calculate_overtime_pay, compute_daily_balance_with_audit,
    record_warnings,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, BalanceReport, DailyRecord, MonthPeriod, PairPolicy, group_by_month,
    records_in_month,
};

use super::request::{MonthlyBalanceRequest, MonthsRequest, WorkdayRequest};
use super::response::{ApiError, ApiErrorResponse, DailyBalanceResponse, MonthsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/balance/daily", post(daily_balance_handler))
        .route("/balance/monthly", post(monthly_balance_handler))
        .route("/balance/months", post(months_handler))
        .with_state(state)
}

/// Handler for POST /balance/daily.
///
/// Returns the signed balance of a single record.
async fn daily_balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkdayRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let record = match parse_workday(request, state.config().pair_policy()) {
        Ok(record) => record,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let result = compute_daily_balance_with_audit(&record, 1);
    let warnings = record_warnings(&record);

    info!(
        correlation_id = %correlation_id,
        date = %record.date,
        balance = %result.balance,
        warnings = warnings.len(),
        "Daily balance computed"
    );

    json_response(
        StatusCode::OK,
        DailyBalanceResponse {
            date: record.date,
            sign: result.balance.sign,
            minutes: result.balance.minutes,
            formatted: result.balance.to_string(),
            audit_step: result.audit_step,
            warnings,
        },
    )
}

/// Handler for POST /balance/monthly.
///
/// Aggregates the records that fall inside the requested month.
async fn monthly_balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyBalanceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let month = match request.month.as_deref() {
        Some(text) => match text.parse::<MonthPeriod>() {
            Ok(month) => month,
            Err(err) => return engine_error_response(correlation_id, err),
        },
        None => MonthPeriod::from_date(Utc::now().date_naive()),
    };

    if let Err(error) = check_hourly_rate(request.hourly_rate) {
        warn!(correlation_id = %correlation_id, "Negative hourly rate");
        return json_response(StatusCode::BAD_REQUEST, error);
    }

    let config = state.config();
    let records = match parse_workdays(request.workdays, config.pair_policy()) {
        Ok(records) => records,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let selected = records_in_month(&records, month);
    let report = match perform_monthly_calculation(month, &selected, request.hourly_rate, config)
    {
        Ok(report) => report,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        month = %month,
        days = selected.len(),
        dropped = records.len() - selected.len(),
        fifty_percent_minutes = report.balance.fifty_percent_minutes,
        hundred_percent_minutes = report.balance.hundred_percent_minutes,
        deficit_minutes = report.balance.deficit_minutes,
        duration_us = report.audit_trace.duration_us,
        "Monthly balance computed"
    );

    json_response(StatusCode::OK, report)
}

/// Handler for POST /balance/months.
///
/// Reports every month present in the input, most recent first.
async fn months_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing months request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(error) = check_hourly_rate(request.hourly_rate) {
        warn!(correlation_id = %correlation_id, "Negative hourly rate");
        return json_response(StatusCode::BAD_REQUEST, error);
    }

    let config = state.config();
    let records = match parse_workdays(request.workdays, config.pair_policy()) {
        Ok(records) => records,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let months = match group_by_month(&records)
        .into_iter()
        .rev()
        .map(|(month, days)| perform_monthly_calculation(month, &days, request.hourly_rate, config))
        .collect::<EngineResult<Vec<BalanceReport>>>()
    {
        Ok(months) => months,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        days = records.len(),
        months = months.len(),
        "Monthly summaries computed"
    );

    json_response(StatusCode::OK, MonthsResponse { months })
}

/// Builds the full report for one month's records.
fn perform_monthly_calculation(
    month: MonthPeriod,
    records: &[DailyRecord],
    hourly_rate: Option<Decimal>,
    config: &ConfigLoader,
) -> EngineResult<BalanceReport> {
    let start_time = Instant::now();

    let aggregation = aggregate_month_with_audit(records, config.tier_limit_minutes(), 1);
    let mut steps = aggregation.audit_steps;

    let (pay_lines, overtime_pay_total) = match hourly_rate {
        Some(rate) => {
            let next_step = steps.len() as u32 + 1;
            let pay =
                calculate_overtime_pay(&aggregation.balance, rate, config.overtime(), next_step)?;
            steps.extend(pay.audit_steps);
            (pay.pay_lines, Some(pay.total_amount))
        }
        None => (Vec::new(), None),
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(BalanceReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        month,
        balance: aggregation.balance,
        formatted: aggregation.balance.formatted(),
        days: aggregation.days,
        pay_lines,
        overtime_pay_total,
        audit_trace: AuditTrace {
            steps,
            warnings: aggregation.warnings,
            duration_us,
        },
    })
}

/// Parses one request record and screens its pairs against the policy.
fn parse_workday(request: WorkdayRequest, policy: PairPolicy) -> EngineResult<DailyRecord> {
    let record = DailyRecord::try_from(request)?;
    record.check_pairs(policy)?;
    Ok(record)
}

fn parse_workdays(
    requests: Vec<WorkdayRequest>,
    policy: PairPolicy,
) -> EngineResult<Vec<DailyRecord>> {
    requests
        .into_iter()
        .map(|request| parse_workday(request, policy))
        .collect()
}

fn check_hourly_rate(hourly_rate: Option<Decimal>) -> Result<(), ApiError> {
    match hourly_rate {
        Some(rate) if rate < Decimal::ZERO => Err(
            ApiError::validation_error(format!("hourly_rate must not be negative, got {}", rate)),
        ),
        _ => Ok(()),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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

    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, EngineMetadata, OvertimeConfig, RecordSettings};
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn rejecting_state() -> AppState {
        let config = EngineConfig::new(
            EngineMetadata {
                code: "strict".to_string(),
                name: "Strict".to_string(),
                version: "1".to_string(),
            },
            RecordSettings {
                incomplete_pairs: PairPolicy::Reject,
            },
            OvertimeConfig::default(),
        )
        .unwrap();
        AppState::new(ConfigLoader::from_config(config))
    }

    async fn post(state: AppState, uri: &str, body: String) -> (StatusCode, Value) {
        let response = create_router(state)
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
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn workday(date: &str, pairs: &[(&str, &str)]) -> Value {
        let mut day = json!({ "date": date, "workload": "08:00" });
        for (index, (arrival, leaving)) in pairs.iter().enumerate() {
            day[format!("arrival{}", index + 1)] = json!(arrival);
            day[format!("leaving{}", index + 1)] = json!(leaving);
        }
        day
    }

    // ==========================================================================
    // API-001: daily balance with overtime
    // ==========================================================================
    #[tokio::test]
    async fn test_api_001_daily_balance_returns_200() {
        let body = workday("2026-03-02", &[("08:00", "12:00"), ("13:00", "18:30")]);

        let (status, json) = post(create_test_state(), "/balance/daily", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["date"], "2026-03-02");
        assert_eq!(json["sign"], "positive");
        assert_eq!(json["minutes"], 90);
        assert_eq!(json["formatted"], "+01:30");
        assert_eq!(json["audit_step"]["rule_id"], "daily_balance");
    }

    // ==========================================================================
    // API-002: malformed JSON
    // ==========================================================================
    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let (status, json) =
            post(create_test_state(), "/balance/daily", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    // ==========================================================================
    // API-003: missing workload
    // ==========================================================================
    #[tokio::test]
    async fn test_api_003_missing_workload_returns_400() {
        let body = json!({ "date": "2026-03-02", "arrival1": "08:00" });

        let (status, json) = post(create_test_state(), "/balance/daily", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("workload"));
    }

    // ==========================================================================
    // API-004: invalid time text names the field
    // ==========================================================================
    #[tokio::test]
    async fn test_api_004_invalid_time_returns_400() {
        let body = workday("2026-03-02", &[("8:00", "12:00")]);

        let (status, json) = post(create_test_state(), "/balance/daily", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_TIME");
        assert_eq!(json["message"], "The arrival1 time format is invalid.");
    }

    #[tokio::test]
    async fn test_half_pair_ignored_with_warning() {
        let mut body = workday("2026-03-02", &[("08:00", "16:00")]);
        body["arrival2"] = json!("17:00");

        let (status, json) = post(create_test_state(), "/balance/daily", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sign"], "none");
        assert_eq!(json["formatted"], "00:00");
        assert_eq!(json["warnings"][0]["code"], "INCOMPLETE_PAIR");
    }

    #[tokio::test]
    async fn test_half_pair_rejected_under_reject_policy() {
        let mut body = workday("2026-03-02", &[("08:00", "16:00")]);
        body["arrival2"] = json!("17:00");

        let (status, json) = post(rejecting_state(), "/balance/daily", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INCOMPLETE_RECORD");
    }

    #[tokio::test]
    async fn test_monthly_balance_with_pay() {
        let body = json!({
            "month": "2026-03",
            "hourly_rate": "20.00",
            "workdays": [
                workday("2026-03-02", &[("08:00", "12:00"), ("13:00", "18:30")]),
                workday("2026-03-03", &[("07:00", "12:00"), ("13:00", "20:00")]),
                workday("2026-03-04", &[("08:00", "11:00")]),
                workday("2026-04-01", &[("08:00", "20:00")]),
            ]
        });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let report: BalanceReport = serde_json::from_value(json).unwrap();
        assert_eq!(report.month.to_string(), "2026-03");
        assert_eq!(report.days.len(), 3);
        assert_eq!(report.balance.fifty_percent_minutes, 210);
        assert_eq!(report.balance.hundred_percent_minutes, 120);
        assert_eq!(report.balance.deficit_minutes, 300);
        assert_eq!(report.formatted.positive.fifty, "03:30");
        assert_eq!(report.formatted.positive.hundred, "02:00");
        assert_eq!(report.formatted.negative, "05:00");
        assert_eq!(report.pay_lines.len(), 2);
        assert_eq!(
            report.overtime_pay_total,
            Some(Decimal::from_str("185.00").unwrap())
        );

        // 3 daily steps, 2 split steps, 2 pay steps
        assert_eq!(report.audit_trace.steps.len(), 7);
        let numbers: Vec<u32> = report.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=7).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn test_monthly_without_rate_has_no_pay() {
        let body = json!({
            "month": "2026-03",
            "workdays": [workday("2026-03-02", &[("08:00", "17:00")])]
        });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["balance"]["fifty_percent_minutes"], 60);
        assert_eq!(json["pay_lines"], json!([]));
        assert!(json.get("overtime_pay_total").is_none());
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let body = json!({ "month": "2026-13", "workdays": [] });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_negative_rate_returns_400() {
        let body = json!({ "month": "2026-03", "hourly_rate": "-1", "workdays": [] });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_months_most_recent_first() {
        let body = json!({
            "workdays": [
                workday("2026-01-05", &[("08:00", "17:00")]),
                workday("2026-03-02", &[("08:00", "16:00")]),
                workday("2026-02-02", &[("08:00", "15:00")]),
                workday("2026-03-03", &[("08:00", "18:00")]),
            ]
        });

        let (status, json) = post(create_test_state(), "/balance/months", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let response: MonthsResponse = serde_json::from_value(json).unwrap();
        let months: Vec<String> = response.months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2026-03", "2026-02", "2026-01"]);

        assert_eq!(response.months[0].days.len(), 2);
        assert_eq!(response.months[0].balance.fifty_percent_minutes, 120);
        assert_eq!(response.months[1].balance.deficit_minutes, 60);
        assert_eq!(response.months[2].balance.fifty_percent_minutes, 60);
    }

    #[tokio::test]
    async fn test_missing_month_defaults_to_current() {
        let today = Utc::now().date_naive();
        let body = json!({
            "workdays": [workday(&today.to_string(), &[("08:00", "17:00")])]
        });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let current = MonthPeriod::from_date(Utc::now().date_naive());
        assert_eq!(json["month"], current.to_string());
    }

    #[tokio::test]
    async fn test_huge_hourly_rate_returns_400() {
        let day = workday("2026-03-02", &[("08:00", "17:00")]);
        let monthly = json!({
            "month": "2026-03",
            "hourly_rate": "79228162514264337593543950335",
            "workdays": [day.clone()]
        });
        let months = json!({
            "hourly_rate": "79228162514264337593543950335",
            "workdays": [day]
        });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", monthly.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("too large"));

        let (status, json) = post(create_test_state(), "/balance/months", months.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_large_rate_within_range_is_paid() {
        let body = json!({
            "month": "2026-03",
            "hourly_rate": "1000000000000",
            "workdays": [workday("2026-03-02", &[("08:00", "17:00")])]
        });

        let (status, json) =
            post(create_test_state(), "/balance/monthly", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overtime_pay_total"], "1500000000000.00");
    }

    #[test]
    fn test_check_hourly_rate() {
        assert!(check_hourly_rate(None).is_ok());
        assert!(check_hourly_rate(Some(Decimal::ZERO)).is_ok());
        assert!(check_hourly_rate(Some(Decimal::new(2500, 2))).is_ok());
        assert!(check_hourly_rate(Some(Decimal::new(-1, 0))).is_err());
    }

    #[test]
    fn test_perform_monthly_calculation_empty() {
        let month = MonthPeriod::new(2026, 3).unwrap();
        let report =
            perform_monthly_calculation(month, &[], None, &ConfigLoader::default()).unwrap();

        assert!(report.balance.is_zero());
        assert!(report.days.is_empty());
        assert!(report.audit_trace.steps.is_empty());
        assert_eq!(report.formatted.negative, "00:00");
    }
}
