//! Per-application placement lookup.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::PlatformError;
use crate::domain::models::{Application, PlacementRecord};
use crate::domain::ports::PlatformClient;

/// Resolves where the instances of one application's process are running.
pub struct PlacementResolver {
    client: Arc<dyn PlatformClient>,
    process_type: String,
}

impl PlacementResolver {
    pub fn new(client: Arc<dyn PlatformClient>, process_type: impl Into<String>) -> Self {
        Self {
            client,
            process_type: process_type.into(),
        }
    }

    /// One record per instance reported by the platform. Not retried.
    #[instrument(skip(self, app), fields(app = %app.name, guid = %app.guid))]
    pub async fn resolve(&self, app: &Application) -> Result<Vec<PlacementRecord>, PlatformError> {
        let instances = self.client.process_stats(app, &self.process_type).await?;
        debug!(instances = instances.len(), "resolved process placement");

        Ok(instances
            .into_iter()
            .map(|instance| PlacementRecord::new(instance.host, app.name.clone()))
            .collect())
    }
}
