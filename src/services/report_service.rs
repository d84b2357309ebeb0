//! End-to-end report generation.
//!
//! Lists every application, resolves each application's placement with a
//! bounded number of lookups in flight, folds the results into a host map and
//! sorts the hosts. The operation is all-or-nothing: the first failure, a
//! cancellation or the deadline drops every outstanding lookup and no report
//! is produced.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{Report, ReportConfig};
use crate::domain::ports::PlatformClient;

use super::application_lister::ApplicationLister;
use super::host_aggregator::HostAggregator;
use super::placement_resolver::PlacementResolver;
use super::report_sorter::sort_hosts;

/// Produces placement reports against one platform.
pub struct ReportService {
    lister: ApplicationLister,
    resolver: PlacementResolver,
    max_concurrency: usize,
    timeout: Duration,
}

impl ReportService {
    pub fn new(client: Arc<dyn PlatformClient>, config: &ReportConfig) -> Self {
        Self {
            lister: ApplicationLister::new(Arc::clone(&client)),
            resolver: PlacementResolver::new(client, config.process_type.clone()),
            max_concurrency: config.max_concurrency.max(1),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Generate a report, giving up when `cancel` fires or the configured
    /// deadline passes.
    #[instrument(skip_all)]
    pub async fn generate(&self, cancel: &CancellationToken) -> ReportResult<Report> {
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ReportError::Cancelled),
            result = tokio::time::timeout(self.timeout, self.build()) => {
                result.unwrap_or(Err(ReportError::TimedOut(self.timeout)))
            }
        };

        match &outcome {
            Ok(report) => info!(
                hosts = report.len(),
                placements = report.placement_count(),
                elapsed_ms = elapsed_ms(started),
                "placement report generated"
            ),
            Err(err) => warn!(
                error = %err,
                elapsed_ms = elapsed_ms(started),
                "placement report failed"
            ),
        }

        outcome
    }

    async fn build(&self) -> ReportResult<Report> {
        let applications = self.lister.list_all().await.map_err(ReportError::Listing)?;

        // Lookups run concurrently but only this task touches the aggregator.
        // Returning early drops the stream, which cancels whatever is in flight.
        let resolver = &self.resolver;
        let mut placements = stream::iter(applications)
            .map(|app| async move {
                match resolver.resolve(&app).await {
                    Ok(records) => Ok(records),
                    Err(source) => Err(ReportError::Resolution {
                        app: app.name,
                        guid: app.guid,
                        source,
                    }),
                }
            })
            .buffer_unordered(self.max_concurrency);

        let mut aggregator = HostAggregator::new();
        while let Some(records) = placements.next().await {
            aggregator.fold_all(records?);
        }

        Ok(sort_hosts(aggregator.finish()))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
