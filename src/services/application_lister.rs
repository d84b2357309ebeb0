//! Exhaustive pagination over the application catalog.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::PlatformError;
use crate::domain::models::{Application, PageCursor};
use crate::domain::ports::PlatformClient;

/// Lists every application the credentials can see.
pub struct ApplicationLister {
    client: Arc<dyn PlatformClient>,
}

impl ApplicationLister {
    pub fn new(client: Arc<dyn PlatformClient>) -> Self {
        Self { client }
    }

    /// Request pages until the platform reports there is no next page.
    ///
    /// The first failing page aborts the listing; applications from earlier
    /// pages are dropped with it. A cursor the platform has already handed
    /// out once is rejected as a malformed response rather than followed.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Application>, PlatformError> {
        let mut applications = Vec::new();
        let mut followed: HashSet<PageCursor> = HashSet::new();
        let mut cursor: Option<PageCursor> = None;
        let mut pages = 0usize;

        loop {
            let page = self.client.list_applications(cursor.as_ref()).await?;
            pages += 1;
            debug!(page = pages, count = page.applications.len(), "received application page");
            applications.extend(page.applications);

            let Some(next) = page.next else {
                break;
            };
            if !followed.insert(next.clone()) {
                return Err(PlatformError::MalformedResponse(format!(
                    "page cursor {next} was returned twice"
                )));
            }
            cursor = Some(next);
        }

        debug!(pages, applications = applications.len(), "application catalog listed");
        Ok(applications)
    }
}
