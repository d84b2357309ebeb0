//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Optional YAML file
//! - Platform-provided environment (`VCAP_APPLICATION`, `CF_*`, `PORT`)
//! - `PLACEMENT_*` overrides
//! - Validation of required credentials

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
