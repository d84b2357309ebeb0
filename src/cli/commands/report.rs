//! `report`: print the placement report once.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::cli::output::table::format_report;
use crate::domain::models::Config;
use crate::infrastructure::setup::build_report_service;

pub async fn execute(config: Config, json: bool) -> Result<()> {
    let report_service = build_report_service(&config).await?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let report = report_service.generate(&cancel).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}
