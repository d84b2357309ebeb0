//! Cloud Foundry v3 API adapter
//!
//! Implements the `PlatformClient` port over HTTP:
//! - Login server discovery and password-grant tokens
//! - Application catalog pagination
//! - Per-process instance statistics
//! - Client-side rate limiting

pub mod auth;
pub mod client;
pub mod errors;
pub mod rate_limiter;
pub mod types;

pub use auth::{PasswordCredentials, TokenSource};
pub use client::{CloudFoundryClient, CloudFoundryClientConfig};
pub use errors::CfApiError;
pub use rate_limiter::TokenBucketRateLimiter;
