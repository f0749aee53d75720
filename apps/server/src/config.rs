use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use budgetpal_core::utils::time_utils::DEFAULT_TIMEZONE;
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub baas_url: String,
    pub baas_anon_key: String,
    pub admin_emails: Vec<String>,
    pub timezone: Tz,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

fn comma_separated(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Reads `BUDGETPAL_*` variables, loading a `.env` file first when present.
    ///
    /// Backend credentials are not checked here; `build_state` reports them.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset variables take their defaults; set but malformed ones are errors.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = var("BUDGETPAL_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid BUDGETPAL_LISTEN_ADDR")?;
        let baas_url = var("BUDGETPAL_BAAS_URL").unwrap_or_default();
        let baas_anon_key = var("BUDGETPAL_BAAS_ANON_KEY").unwrap_or_default();
        let admin_emails = comma_separated(&var("BUDGETPAL_ADMIN_EMAILS").unwrap_or_default());
        let timezone: Tz = match var("BUDGETPAL_TIMEZONE") {
            Some(name) => name
                .parse()
                .map_err(|e| anyhow!("Invalid BUDGETPAL_TIMEZONE '{}': {}", name, e))?,
            None => DEFAULT_TIMEZONE,
        };
        let cors_allow =
            comma_separated(&var("BUDGETPAL_CORS_ALLOW_ORIGINS").unwrap_or_else(|| "*".into()));
        let timeout_ms: u64 = match var("BUDGETPAL_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid BUDGETPAL_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => 30_000,
        };
        let log_format = match var("BUDGETPAL_LOG_FORMAT") {
            Some(raw) => raw.parse().context("Invalid BUDGETPAL_LOG_FORMAT")?,
            None => LogFormat::default(),
        };
        Ok(Self {
            listen_addr,
            baas_url,
            baas_anon_key,
            admin_emails,
            timezone,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_comma_separated_drops_blanks() {
        assert_eq!(
            comma_separated(" a@uni.edu, ,B@uni.edu ,"),
            vec!["a@uni.edu".to_string(), "B@uni.edu".to_string()]
        );
        assert!(comma_separated("").is_empty());
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_reads_timeout_and_log_format() {
        let config = Config::from_lookup(lookup(&[
            ("BUDGETPAL_REQUEST_TIMEOUT_MS", "1500"),
            ("BUDGETPAL_LOG_FORMAT", "JSON"),
            ("BUDGETPAL_TIMEZONE", "Africa/Lagos"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.timezone, chrono_tz::Africa::Lagos);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        for (key, value) in [
            ("BUDGETPAL_REQUEST_TIMEOUT_MS", "30s"),
            ("BUDGETPAL_LOG_FORMAT", "yaml"),
            ("BUDGETPAL_TIMEZONE", "Mars/Olympus"),
            ("BUDGETPAL_LISTEN_ADDR", "localhost"),
        ] {
            let err = Config::from_lookup(lookup(&[(key, value)])).err();
            let message = format!("{:#}", err.expect("malformed value should fail"));
            assert!(message.contains(key), "{}", message);
        }
    }
}
