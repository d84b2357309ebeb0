//! Domain layer: placement model, errors and the platform port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{PlatformError, ReportError, ReportResult};
