//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Cloud Foundry API client
//! - Configuration management
//! - Logging infrastructure
//! - HTTP server and HTML rendering
//! - Startup wiring
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod cloudfoundry;
pub mod config;
pub mod http;
pub mod logging;
pub mod setup;
