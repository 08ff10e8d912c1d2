// HTTP request handlers
use crate::application::alerts::VitalAlert;
use crate::application::scan_service::ScanReading;
use crate::domain::trend::{ChartCanvas, Timeframe, TrendView};
use crate::domain::vitals::{MetricKind, MetricSummary};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::num::ParseIntError;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub metric: Option<MetricKind>,
    pub timeframe: Option<Timeframe>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    /// Comma separated vitals ids the user already dismissed
    pub dismissed: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Metrics available for trending
pub async fn list_metrics() -> Json<Vec<MetricSummary>> {
    Json(MetricKind::all().into_iter().map(MetricSummary::from).collect())
}

/// Trend for one metric and timeframe, bucketed in server local time
pub async fn student_trend(
    Path(student_id): Path<String>,
    Query(query): Query<TrendQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<TrendView> {
    let metric = query.metric.unwrap_or(MetricKind::BloodPressure);
    let timeframe = query.timeframe.unwrap_or_default();
    let canvas = resolve_canvas(query.width, query.height, state.default_canvas);
    let now = chrono::Local::now().fixed_offset();

    let view = state
        .trend_service
        .trend(&student_id, metric, timeframe, canvas, &now)
        .await;
    Json(view)
}

/// Abnormal readings not yet dismissed
pub async fn student_alerts(
    Path(student_id): Path<String>,
    Query(query): Query<AlertQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VitalAlert>>, (StatusCode, String)> {
    let dismissed = parse_dismissed(query.dismissed.as_deref().unwrap_or(""))
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid dismissed id: {}", e)))?;

    match state.alert_service.alerts(&student_id, &dismissed).await {
        Ok(alerts) => Ok(Json(alerts)),
        Err(e) => {
            tracing::error!("Error fetching alerts for student {}: {:#}", student_id, e);
            // Return empty list on error
            Ok(Json(Vec::new()))
        }
    }
}

/// Last stored scan with its Normal/Abnormal status
pub async fn latest_scan(
    Path(student_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScanReading>, StatusCode> {
    match state.scan_service.latest(&student_id).await {
        Ok(Some(scan)) => Ok(Json(scan)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Error fetching latest scan for student {}: {:#}", student_id, e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Scan log, newest first
pub async fn scan_history(
    Path(student_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ScanReading>> {
    match state.scan_service.history(&student_id).await {
        Ok(scans) => Json(scans),
        Err(e) => {
            tracing::error!("Error fetching scans for student {}: {:#}", student_id, e);
            // Return empty list on error
            Json(Vec::new())
        }
    }
}

/// Requested canvas, falling back per dimension when missing or not positive
pub fn resolve_canvas(width: Option<f64>, height: Option<f64>, fallback: ChartCanvas) -> ChartCanvas {
    let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
    ChartCanvas {
        width: positive(width).unwrap_or(fallback.width),
        height: positive(height).unwrap_or(fallback.height),
    }
}

pub fn parse_dismissed(raw: &str) -> Result<HashSet<i64>, ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .collect()
}
