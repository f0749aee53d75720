//! Connection settings for the hosted backend.

use std::time::Duration;

use budgetpal_core::errors::{Error, Result};

/// Default timeout for backend requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fragments that mark a value copied from a sample `.env` file.
const PLACEHOLDER_MARKERS: [&str; 3] = ["your-project", "your_", "placeholder"];

/// Backend project URL and anonymous (publishable) key.
#[derive(Clone)]
pub struct BaasConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for BaasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaasConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Whether `value` is empty or still a sample placeholder.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    let lowered = value.to_ascii_lowercase();
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

impl BaasConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        BaasConfig {
            url: url.into().trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.into().trim().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fails with `Error::Configuration` unless both values look real.
    pub fn validate(&self) -> Result<()> {
        if is_placeholder(&self.url) {
            return Err(Error::Configuration(
                "Backend URL is not configured (set BUDGETPAL_BAAS_URL)".to_string(),
            ));
        }
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(Error::Configuration(format!(
                "Backend URL '{}' must start with http:// or https://",
                self.url
            )));
        }
        if is_placeholder(&self.anon_key) {
            return Err(Error::Configuration(
                "Backend anon key is not configured (set BUDGETPAL_BAAS_ANON_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }
}
