//! HTTP request handlers
//!
//! Every request (any method, any path except `/health`) benchmarks all
//! configured strategies and answers with one JSON document. `/health`
//! answers any method as well.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{BenchError, BenchResult};
use crate::runner::{BenchmarkRunner, BenchmarkSummary};
use crate::strategy::{self, Strategy};

/// Shared state for the handlers
pub struct AppState {
    pub strategies: Vec<Strategy>,
    pub runner: BenchmarkRunner,
    pub default_runs: u32,
}

/// Benchmark response
#[derive(Debug, Serialize, Deserialize)]
pub struct BenchResponse {
    pub runs: u32,
    pub results: BTreeMap<String, BenchmarkSummary>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub strategies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<BenchError> for ErrorResponse {
    fn from(e: BenchError) -> Self {
        Self {
            error: e.to_string(),
            code: e.code().to_string(),
        }
    }
}

fn error_response(e: BenchError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(e.into()))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategies: state.strategies.iter().map(|s| s.name.clone()).collect(),
    })
}

pub async fn run_benchmarks(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<BenchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let runs = parse_runs(query.as_deref(), state.default_runs).map_err(|e| {
        tracing::warn!("Rejected request: {}", e);
        error_response(e)
    })?;

    let results = strategy::run_all(&state.runner, &state.strategies, runs)
        .await
        .map_err(error_response)?;

    Ok(Json(BenchResponse { runs, results }))
}

/// Read `runs` from a raw query string.
///
/// Only the first `runs` pair counts. The value is read like a leading
/// integer (`" 12abc"` is 12); a missing, empty or digit-less value yields
/// `default`. Zero, negative and out-of-range counts are rejected.
pub fn parse_runs(query: Option<&str>, default: u32) -> BenchResult<u32> {
    let value = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "runs")
            .map(|(_, value)| value.into_owned())
    });

    let Some(n) = value.as_deref().and_then(leading_int) else {
        return Ok(default);
    };

    u32::try_from(n)
        .ok()
        .filter(|&runs| runs > 0)
        .ok_or(BenchError::InvalidRuns(n))
}

/// Optional whitespace, optional sign, then decimal digits. Saturates on overflow.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().try_fold(0i64, |acc, b| {
        acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
    });
    Some(match (magnitude, negative) {
        (Some(n), true) => -n,
        (Some(n), false) => n,
        (None, true) => i64::MIN,
        (None, false) => i64::MAX,
    })
}
