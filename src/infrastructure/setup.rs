//! Startup wiring
//!
//! Builds the long-lived platform client from validated configuration and
//! hands it to the report service. Runs once per process.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::domain::models::Config;
use crate::domain::ports::PlatformClient;
use crate::infrastructure::cloudfoundry::{CloudFoundryClient, CloudFoundryClientConfig};
use crate::services::ReportService;

/// Connect to the platform, authenticate once, and build the report service.
///
/// Any failure here is fatal: the process must not serve requests without a
/// working platform session.
pub async fn build_report_service(config: &Config) -> Result<Arc<ReportService>> {
    let client_config = CloudFoundryClientConfig::from_platform(&config.platform)
        .context("Invalid platform configuration")?;

    let client = CloudFoundryClient::connect(client_config)
        .await
        .context("Failed to create Cloud Foundry client")?;

    client
        .authenticate()
        .await
        .context("Failed to authenticate against the platform")?;

    info!(
        process_type = %config.report.process_type,
        max_concurrency = config.report.max_concurrency,
        "platform session established"
    );

    let client: Arc<dyn PlatformClient> = Arc::new(client);
    Ok(Arc::new(ReportService::new(client, &config.report)))
}
