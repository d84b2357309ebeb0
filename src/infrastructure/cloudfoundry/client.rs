use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::auth::{PasswordCredentials, TokenSource};
use super::errors::CfApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::types::{AppListResponse, ProcessStatsResponse, RootInfo};
use crate::domain::errors::PlatformError;
use crate::domain::models::{
    Application, ApplicationPage, PageCursor, PlatformConfig, ProcessInstance,
};
use crate::domain::ports::PlatformClient;
use crate::infrastructure::logging::scrub_secrets;

/// Configuration for the Cloud Foundry HTTP client
#[derive(Clone)]
pub struct CloudFoundryClientConfig {
    /// Base URL of the v3 API
    pub api_endpoint: String,

    /// Password-grant credentials
    pub credentials: PasswordCredentials,

    /// Accept invalid TLS certificates
    pub skip_tls_validation: bool,

    /// Rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Applications requested per catalog page
    pub per_page: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CloudFoundryClientConfig {
    /// Build from validated platform settings
    pub fn from_platform(config: &PlatformConfig) -> Result<Self, CfApiError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| CfApiError::InvalidRequest(format!("{name} is not configured")))
        };

        Ok(Self {
            api_endpoint: required(&config.api_endpoint, "API endpoint")?,
            credentials: PasswordCredentials {
                client_id: config.client_id.clone(),
                username: required(&config.username, "username")?,
                password: required(&config.password, "password")?,
            },
            skip_tls_validation: config.skip_tls_validation,
            rate_limit_rps: config.rate_limit_rps,
            per_page: config.per_page,
            timeout_secs: config.timeout_secs,
        })
    }
}

/// Authenticated, rate-limited client for the Cloud Foundry v3 API
///
/// Created once at startup and shared behind an `Arc`. Requests are never
/// retried; a failure is reported to the caller as-is.
pub struct CloudFoundryClient {
    http_client: ReqwestClient,
    base_url: Url,
    per_page: u32,
    tokens: TokenSource,
    rate_limiter: TokenBucketRateLimiter,
}

impl CloudFoundryClient {
    /// Build the HTTP client and discover the login server from the API root.
    #[instrument(skip(config), fields(api = %config.api_endpoint))]
    pub async fn connect(config: CloudFoundryClientConfig) -> Result<Self, CfApiError> {
        info!(
            "Initializing Cloud Foundry client: api={}, rate_limit={} rps, timeout={}s, skip_tls_validation={}",
            config.api_endpoint, config.rate_limit_rps, config.timeout_secs, config.skip_tls_validation
        );

        if config.skip_tls_validation {
            warn!("TLS certificate validation is disabled for the platform API");
        }

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .danger_accept_invalid_certs(config.skip_tls_validation)
            .build()?;

        let root_url = format!("{}/", config.api_endpoint.trim_end_matches('/'));
        let base_url = Url::parse(&root_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                CfApiError::InvalidRequest(format!("invalid API endpoint: {}", config.api_endpoint))
            })?;
        let response = http_client
            .get(&root_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let root: RootInfo = decode(&root_url, response).await?;
        let login_url = root
            .token_server()
            .ok_or_else(|| CfApiError::LoginDiscovery(root_url.clone()))?
            .to_string();

        debug!(login = %login_url, "discovered login server");

        let tokens = TokenSource::new(http_client.clone(), &login_url, config.credentials);

        Ok(Self {
            http_client,
            base_url,
            per_page: config.per_page,
            tokens,
            rate_limiter: TokenBucketRateLimiter::new(config.rate_limit_rps),
        })
    }

    /// Fetch an access token now, so bad credentials surface at startup.
    pub async fn authenticate(&self) -> Result<(), CfApiError> {
        self.tokens.authorization().await.map(|_| ())
    }

    /// API URL with `segments` appended to the endpoint path, each one
    /// percent-encoded as a single segment.
    fn api_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        // Checked to be a base URL in `connect`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn first_page_url(&self) -> Url {
        let mut url = self.api_url(["v3", "apps"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        url
    }

    fn stats_url(&self, app_guid: &str, process_type: &str) -> Url {
        self.api_url(["v3", "apps", app_guid, "processes", process_type, "stats"])
    }

    /// GET `url` with a bearer token and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CfApiError> {
        self.rate_limiter.acquire().await;
        let authorization = self.tokens.authorization().await?;

        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let result = decode(url, response).await;
        if matches!(result, Err(CfApiError::Unauthorized(_))) {
            // Next call re-authenticates; this one still fails.
            self.tokens.invalidate().await;
        }
        result
    }
}

/// Check the status and decode the body of a platform response
async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, CfApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let text = scrub_secrets(&String::from_utf8_lossy(&body));
        warn!("API error ({}) for {}: {}", status, url, text);
        return Err(CfApiError::from_status(status, text));
    }

    serde_json::from_slice(&body).map_err(|e| CfApiError::Malformed {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl PlatformClient for CloudFoundryClient {
    async fn list_applications(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ApplicationPage, PlatformError> {
        let url = cursor.map_or_else(|| self.first_page_url().into(), |c| c.as_str().to_string());
        let page: AppListResponse = self.get_json(&url).await?;

        debug!(
            total_results = page.pagination.total_results,
            total_pages = page.pagination.total_pages,
            "application page decoded"
        );

        Ok(ApplicationPage {
            applications: page
                .resources
                .into_iter()
                .map(|app| Application::new(app.guid, app.name))
                .collect(),
            next: page.pagination.next.map(|link| PageCursor::new(link.href)),
        })
    }

    async fn process_stats(
        &self,
        app: &Application,
        process_type: &str,
    ) -> Result<Vec<ProcessInstance>, PlatformError> {
        let url = self.stats_url(&app.guid, process_type);
        let stats: ProcessStatsResponse = self.get_json(url.as_str()).await?;

        Ok(stats
            .resources
            .into_iter()
            .map(|stat| ProcessInstance {
                index: stat.index,
                state: stat.state,
                host: stat.host.unwrap_or_default(),
            })
            .collect())
    }
}
