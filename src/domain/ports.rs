use async_trait::async_trait;

use super::errors::PlatformError;
use super::models::{Application, ApplicationPage, PageCursor, ProcessInstance};

/// Read-only view of the platform-management API.
///
/// One long-lived implementation is created at startup and shared by every
/// report operation.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetch one page of the application catalog
    ///
    /// # Arguments
    /// * `cursor` - `None` for the first page, otherwise the cursor returned
    ///   with the previous page, unchanged
    async fn list_applications(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ApplicationPage, PlatformError>;

    /// Fetch runtime statistics for every instance of one process type of `app`
    async fn process_stats(
        &self,
        app: &Application,
        process_type: &str,
    ) -> Result<Vec<ProcessInstance>, PlatformError>;
}
