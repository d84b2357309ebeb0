//! placement-report - Cloud Foundry application placement inventory
//!
//! Builds a report mapping every host in a Cloud Foundry foundation to the
//! applications whose instances are running on it, and serves it as HTML or
//! JSON.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): placement model, errors and the platform port
//! - **Service Layer** (`services`): listing, placement resolution, aggregation
//!   and ordering of the report
//! - **Infrastructure Layer** (`infrastructure`): Cloud Foundry HTTP client,
//!   configuration, logging and the HTTP server
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use placement_report::infrastructure::config::ConfigLoader;
//! use placement_report::infrastructure::setup::build_report_service;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None)?;
//!     let service = build_report_service(&config).await?;
//!     let report = service.generate(&CancellationToken::new()).await?;
//!     for host in &report {
//!         println!("{}: {}", host.host, host.apps.join(", "));
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{PlatformError, ReportError, ReportResult};
pub use domain::models::{
    Application, ApplicationPage, Config, HostReport, PageCursor, PlacementRecord,
    ProcessInstance, Report,
};
pub use domain::ports::PlatformClient;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::ReportService;
