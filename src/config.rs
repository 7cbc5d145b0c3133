//! Configuration for the notification layer
//!
//! Configuration is passed explicitly to sink constructors and render
//! contexts; nothing in this crate reads process-global state.

use crate::error::{NotifyError, Result};
use std::env;
use std::net::SocketAddr;

/// Configuration consumed by the sinks and the template renderer
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret embedded in action links
    pub token_secret: String,

    /// Base URL of the reaper HTTP API that action links target
    pub http_api_url: String,

    /// Address of the local collector agent
    pub statsd_addr: SocketAddr,

    /// Enable the Datadog sink
    pub datadog: bool,

    /// Enable the tag-updating sink
    pub tagging: bool,

    /// Log level
    pub log_level: String,

    /// Log format (json or pretty)
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            http_api_url: "http://localhost:9000".to_string(),
            statsd_addr: SocketAddr::from(([127, 0, 0, 1], 8125)),
            datadog: true,
            tagging: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(secret) = env::var("REAPER_TOKEN_SECRET") {
            config.token_secret = secret;
        }

        if let Ok(url) = env::var("REAPER_HTTP_API_URL") {
            config.http_api_url = url;
        }

        if let Ok(addr) = env::var("REAPER_STATSD_ADDR") {
            config.statsd_addr = addr
                .parse()
                .map_err(|e| NotifyError::Config(format!("invalid REAPER_STATSD_ADDR: {e}")))?;
        }

        if let Ok(enabled) = env::var("REAPER_EVENT_DATADOG") {
            config.datadog = parse_bool("REAPER_EVENT_DATADOG", &enabled)?;
        }

        if let Ok(enabled) = env::var("REAPER_EVENT_TAGGING") {
            config.tagging = parse_bool("REAPER_EVENT_TAGGING", &enabled)?;
        }

        if let Ok(level) = env::var("REAPER_LOG_LEVEL") {
            config.log_level = level;
        }

        if let Ok(format) = env::var("REAPER_LOG_FORMAT") {
            config.log_format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                other => {
                    return Err(NotifyError::Config(format!(
                        "invalid REAPER_LOG_FORMAT: {other} (expected 'json' or 'pretty')"
                    )))
                }
            };
        }

        Ok(config)
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(NotifyError::Config(format!(
            "invalid {var}: {other} (expected 'true' or 'false')"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.statsd_addr, SocketAddr::from(([127, 0, 0, 1], 8125)));
        assert!(config.datadog);
        assert!(!config.tagging);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "no").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("REAPER_TOKEN_SECRET", "s3cret");
        env::set_var("REAPER_HTTP_API_URL", "https://reaper.example.com");
        env::set_var("REAPER_STATSD_ADDR", "127.0.0.1:9125");
        env::set_var("REAPER_EVENT_TAGGING", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.token_secret, "s3cret");
        assert_eq!(config.http_api_url, "https://reaper.example.com");
        assert_eq!(config.statsd_addr, SocketAddr::from(([127, 0, 0, 1], 9125)));
        assert!(config.tagging);

        env::remove_var("REAPER_TOKEN_SECRET");
        env::remove_var("REAPER_HTTP_API_URL");
        env::remove_var("REAPER_STATSD_ADDR");
        env::remove_var("REAPER_EVENT_TAGGING");
    }
}
