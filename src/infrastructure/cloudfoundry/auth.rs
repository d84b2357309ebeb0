//! OAuth password-grant session against the platform's login server.

use reqwest::Client as ReqwestClient;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::errors::CfApiError;
use super::types::TokenResponse;
use crate::infrastructure::logging::scrub_secrets;

/// Tokens this close to expiry are refreshed before use
const REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Lifetime assumed when the login server omits `expires_in`
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(300);

/// Longer advertised lifetimes are cut to this
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Username/password credentials for the password grant
#[derive(Clone)]
pub struct PasswordCredentials {
    pub client_id: String,
    pub username: String,
    pub password: String,
}

struct CachedToken {
    header_value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

/// Hands out a valid `Authorization` header value, fetching a new access
/// token when the cached one is missing or about to expire.
///
/// The lock is held across the token request so concurrent callers wait for
/// a single refresh instead of each starting their own.
pub struct TokenSource {
    http_client: ReqwestClient,
    token_url: String,
    credentials: PasswordCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(http_client: ReqwestClient, login_url: &str, credentials: PasswordCredentials) -> Self {
        Self {
            http_client,
            token_url: format!("{}/oauth/token", login_url.trim_end_matches('/')),
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// `Authorization` header value for the next request
    pub async fn authorization(&self) -> Result<String, CfApiError> {
        let mut cached = self.cached.lock().await;
        let now = Instant::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.header_value.clone());
        }

        let token = self.request_token().await?;
        let lifetime = token_lifetime(token.expires_in);
        let expires_at = now.checked_add(lifetime).ok_or_else(|| CfApiError::Malformed {
            url: self.token_url.clone(),
            reason: format!("unrepresentable token lifetime of {}s", token.expires_in),
        })?;
        let header_value = format!("{} {}", capitalize_scheme(&token.token_type), token.access_token);

        *cached = Some(CachedToken {
            header_value: header_value.clone(),
            expires_at,
        });
        debug!(expires_in_secs = lifetime.as_secs(), "obtained access token");

        Ok(header_value)
    }

    /// Drop the cached token so the next call fetches a fresh one
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    #[instrument(skip(self), fields(url = %self.token_url, username = %self.credentials.username))]
    async fn request_token(&self) -> Result<TokenResponse, CfApiError> {
        let form = [
            ("grant_type", "password"),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.credentials.client_id, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let text = scrub_secrets(&String::from_utf8_lossy(&body));
            warn!(%status, body = %text, "token request rejected");
            return Err(CfApiError::from_status(status, text));
        }

        serde_json::from_slice(&body).map_err(|e| CfApiError::Malformed {
            url: self.token_url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Advertised `expires_in` as a cache lifetime: zero means unspecified, and
/// anything beyond a day is capped.
fn token_lifetime(expires_in: u64) -> Duration {
    if expires_in == 0 {
        DEFAULT_TOKEN_LIFETIME
    } else {
        Duration::from_secs(expires_in).min(MAX_TOKEN_LIFETIME)
    }
}

/// Login servers answer `bearer`; the API expects `Bearer`.
fn capitalize_scheme(token_type: &str) -> String {
    if token_type.eq_ignore_ascii_case("bearer") {
        "Bearer".to_string()
    } else {
        token_type.to_string()
    }
}
