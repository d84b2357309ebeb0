use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static DEFAULT_SCRUBBER: LazyLock<SecretScrubber> = LazyLock::new(SecretScrubber::new);

/// Redact credentials from text that is about to be logged, such as error
/// bodies returned by the platform or its login server.
pub fn scrub_secrets(message: &str) -> String {
    DEFAULT_SCRUBBER.scrub_message(message)
}

/// Removes bearer tokens and credential fields from free-form text
#[derive(Clone)]
pub struct SecretScrubber {
    bearer_pattern: Regex,
    field_pattern: Regex,
}

impl SecretScrubber {
    pub fn new() -> Self {
        Self {
            // Bearer tokens in Authorization headers
            bearer_pattern: Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-_\.=]+")
                .expect("bearer pattern is valid"),
            // JSON fields and form parameters carrying credentials
            field_pattern: Regex::new(
                r#"(?i)("?(?:access_token|refresh_token|id_token|client_secret|password)"?\s*[:=]\s*"?)([^"\s,&}]+)"#,
            )
            .expect("field pattern is valid"),
        }
    }

    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]");
        self.field_pattern
            .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]))
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
