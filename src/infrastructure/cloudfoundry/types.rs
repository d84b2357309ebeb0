//! Wire types for the Cloud Foundry v3 API and the login server.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

/// `GET /` on the API endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RootInfo {
    pub links: RootLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootLinks {
    #[serde(default)]
    pub login: Option<Link>,

    #[serde(default)]
    pub uaa: Option<Link>,
}

impl RootInfo {
    /// Base URL of the server issuing tokens; the login link wins over uaa.
    pub fn token_server(&self) -> Option<&str> {
        self.links
            .login
            .as_ref()
            .or(self.links.uaa.as_ref())
            .map(|link| link.href.as_str())
    }
}

/// Pagination block shared by list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: u64,

    #[serde(default)]
    pub total_pages: u64,

    /// Absent or null on the last page
    #[serde(default)]
    pub next: Option<Link>,
}

/// `GET /v3/apps`
#[derive(Debug, Clone, Deserialize)]
pub struct AppListResponse {
    pub pagination: Pagination,
    pub resources: Vec<AppResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppResource {
    pub guid: String,
    pub name: String,
}

/// `GET /v3/apps/:guid/processes/:type/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessStatsResponse {
    pub resources: Vec<ProcessStatResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessStatResource {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub state: String,

    /// Missing or null for instances that are not placed
    #[serde(default)]
    pub host: Option<String>,
}

/// OAuth token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
