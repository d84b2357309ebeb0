//! HTTP server exposing the placement report.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::render::render_html;
use crate::domain::errors::ReportError;
use crate::domain::models::ServerConfig;
use crate::services::ReportService;

/// Shared state for the report routes
#[derive(Clone)]
pub struct ReportAppState {
    pub report_service: Arc<ReportService>,

    /// Cancelled on shutdown; each request generates under a child token
    pub shutdown: CancellationToken,
}

/// Build the router: `/` (HTML), `/api/report` (JSON), `/healthz`
pub fn router(state: ReportAppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/report", get(handle_report_json))
        .route("/healthz", get(handle_health))
        .with_state(state)
}

/// Serve until `state.shutdown` is cancelled
pub async fn serve(config: &ServerConfig, state: ReportAppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Placement report server listening on {}", addr);

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")?;

    info!("Placement report server stopped");
    Ok(())
}

async fn handle_index(State(state): State<ReportAppState>) -> Response {
    let cancel = state.shutdown.child_token();
    match state.report_service.generate(&cancel).await {
        Ok(report) => Html(render_html(&report)).into_response(),
        Err(err) => report_failure(&err),
    }
}

async fn handle_report_json(State(state): State<ReportAppState>) -> Response {
    let cancel = state.shutdown.child_token();
    match state.report_service.generate(&cancel).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => report_failure(&err),
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

/// Log the failure by kind; the client only ever sees a generic 500.
fn report_failure(err: &ReportError) -> Response {
    match err.platform_error() {
        Some(source) if source.is_transport_or_auth() => {
            error!(error = %err, "platform unavailable while building placement report");
        }
        Some(_) => error!(error = %err, "platform returned malformed data for placement report"),
        None => warn!(error = %err, "placement report abandoned"),
    }
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
