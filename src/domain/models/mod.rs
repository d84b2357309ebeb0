pub mod application;
pub mod config;
pub mod report;

pub use application::{Application, ApplicationPage, PageCursor, PlacementRecord, ProcessInstance};
pub use config::{Config, LogFormat, LoggingConfig, PlatformConfig, ReportConfig, ServerConfig};
pub use report::{HostReport, Report};
