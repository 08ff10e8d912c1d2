// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::alert_service::AlertService;
use crate::application::scan_service::ScanService;
use crate::application::trend_service::TrendService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::supabase_repository::SupabaseRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, latest_scan, list_metrics, scan_history, student_alerts, student_trend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(SupabaseRepository::new(
        config.supabase.url,
        config.supabase.anon_key,
    ));

    // Create services (application layer)
    let trend_service = TrendService::new(repository.clone(), config.supabase.vitals_limit);
    let alert_service = AlertService::new(
        repository.clone(),
        config.thresholds.clone(),
        config.supabase.alerts_limit,
    );
    let scan_service = ScanService::new(repository, config.thresholds, config.supabase.vitals_limit);

    let state = Arc::new(AppState {
        trend_service,
        alert_service,
        scan_service,
        default_canvas: config.chart,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/metrics", get(list_metrics))
        .route("/students/:id/trends", get(student_trend))
        .route("/students/:id/alerts", get(student_alerts))
        .route("/students/:id/latest", get(latest_scan))
        .route("/students/:id/scans", get(scan_history))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting vitals-trends service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
