//! Applications and the placement of their running instances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A deployable unit in the platform's application catalog.
///
/// The `guid` is unique; `name` is a display name and may repeat across
/// spaces or organizations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Application {
    /// Opaque platform identifier
    pub guid: String,

    /// Display name
    pub name: String,
}

impl Application {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// Opaque next-page token handed out by the platform.
///
/// Callers thread it back unchanged; nothing here inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of the application catalog.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPage {
    /// Applications on this page, in backend order
    pub applications: Vec<Application>,

    /// Cursor for the following page; `None` on the last page
    pub next: Option<PageCursor>,
}

impl ApplicationPage {
    /// Build the final page of a listing.
    pub fn last(applications: Vec<Application>) -> Self {
        Self {
            applications,
            next: None,
        }
    }

    /// Build a page that is followed by `next`.
    pub fn with_next(applications: Vec<Application>, next: PageCursor) -> Self {
        Self {
            applications,
            next: Some(next),
        }
    }
}

/// A single running instance of an application's process, as reported by
/// the platform's process statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessInstance {
    /// Instance index within the process
    pub index: u32,

    /// Instance state as reported by the platform (`RUNNING`, `DOWN`, ...)
    pub state: String,

    /// Host the instance is scheduled on; empty when the platform reports none
    pub host: String,
}

impl ProcessInstance {
    pub fn running(index: u32, host: impl Into<String>) -> Self {
        Self {
            index,
            state: "RUNNING".to_string(),
            host: host.into(),
        }
    }
}

/// One (host, application) observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    /// Host identifier, normally a textual IP address (not validated)
    pub host: String,

    /// Name of the application owning the instance
    pub app_name: String,
}

impl PlacementRecord {
    pub fn new(host: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            app_name: app_name.into(),
        }
    }
}
