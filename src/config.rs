//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Proxy configuration parameters.
///
/// Read once at startup; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// URL of the upstream balance lookup endpoint
    pub upstream_endpoint: String,
    /// Bearer credential for the upstream service
    pub upstream_token: Option<String>,
    /// Per-request timeout applied by the upstream client, in seconds
    pub upstream_timeout: u64,
    /// Redis connection URL; the in-process store is used when unset
    pub redis_url: Option<String>,
    /// Maximum number of entries the in-process store can hold
    pub max_entries: usize,
    /// In-process expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_ENDPOINT` - Upstream lookup URL (default: http://127.0.0.1:8080/balance)
    /// - `UPSTREAM_TOKEN` - Upstream bearer token (default: none)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `REDIS_URL` - Shared Redis store (default: none, in-process store)
    /// - `MAX_ENTRIES` - In-process store capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 30)
    /// - `LOG_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            upstream_endpoint: non_empty_var("UPSTREAM_ENDPOINT")
                .unwrap_or(defaults.upstream_endpoint),
            upstream_token: non_empty_var("UPSTREAM_TOKEN"),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            redis_url: non_empty_var("REDIS_URL"),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            log_format: non_empty_var("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_endpoint: "http://127.0.0.1:8080/balance".to_string(),
            upstream_token: None,
            upstream_timeout: 10,
            redis_url: None,
            max_entries: 10_000,
            cleanup_interval: 30,
            log_format: LogFormat::Text,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(config.redis_url.is_none());
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_config_from_env() {
        // No other test reads these variables
        env::set_var("UPSTREAM_TOKEN", "secret");
        env::set_var("CLEANUP_INTERVAL", "0");
        env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env();
        assert_eq!(config.upstream_token.as_deref(), Some("secret"));
        assert_eq!(config.cleanup_interval, 30, "zero interval falls back to default");
        assert_eq!(config.log_format, LogFormat::Json);

        env::remove_var("UPSTREAM_TOKEN");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("LOG_FORMAT");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }
}
