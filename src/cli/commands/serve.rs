//! `serve`: run the HTTP report server until interrupted.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::models::Config;
use crate::infrastructure::http::{serve, ReportAppState};
use crate::infrastructure::setup::build_report_service;

pub async fn execute(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let report_service = build_report_service(&config).await?;
    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown signal received"),
            Err(err) => warn!(error = %err, "failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    serve(
        &config.server,
        ReportAppState {
            report_service,
            shutdown,
        },
    )
    .await
}
