use crate::error::ScraperError;
use crate::http_client::{EnhancedHttpClient, HttpClientConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://asuracomic.net";
pub const DEFAULT_FALLBACK_PROXY: &str = "https://goodproxy.goodproxy.workers.dev/fetch?url=";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub bot_detection: BotDetectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Root of the upstream site, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy prefixes; the percent-encoded target URL is appended to each
    #[serde(default = "default_fallback_proxies")]
    pub fallback_proxies: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotDetectionConfig {
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Base retry delay in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_true")]
    pub enable_cookies: bool,

    /// Enable gzip/brotli compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

fn default_true() -> bool { true }
fn default_max_retries() -> usize { 3 }
fn default_retry_delay() -> u64 { 1000 }
fn default_timeout() -> u64 { 30 }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_fallback_proxies() -> Vec<String> { vec![DEFAULT_FALLBACK_PROXY.to_string()] }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fallback_proxies: default_fallback_proxies(),
        }
    }
}

impl Default for BotDetectionConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            timeout_secs: default_timeout(),
            enable_cookies: true,
            enable_compression: true,
        }
    }
}

impl Config {
    /// Read `config.toml` from the working directory, or fall back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring config.toml: {}", e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Could not read config.toml: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ScraperError> {
        toml::from_str(content).map_err(|e| ScraperError::Config(e.to_string()))
    }
}

impl BotDetectionConfig {
    /// Create the retrying HTTP client from this configuration
    pub fn create_http_client(&self, referer: Option<String>) -> Result<EnhancedHttpClient, ScraperError> {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
            enable_cookies: self.enable_cookies,
            enable_gzip: self.enable_compression,
            referer,
        };

        EnhancedHttpClient::with_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.source.fallback_proxies.len(), 1);
        assert_eq!(config.bot_detection.max_retries, 3);
        assert_eq!(config.bot_detection.retry_delay_ms, 1000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [source]
            fallback_proxies = []

            [bot_detection]
            max_retries = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
        assert!(config.source.fallback_proxies.is_empty());
        assert_eq!(config.bot_detection.max_retries, 5);
        assert_eq!(config.bot_detection.retry_delay_ms, 1000);
        assert!(config.bot_detection.enable_cookies);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let result = Config::from_toml_str("[bot_detection]\nmax_retries = \"many\"");
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }

    #[test]
    fn test_create_http_client() {
        let client = BotDetectionConfig::default()
            .create_http_client(Some("https://asuracomic.net/".to_string()))
            .unwrap();
        assert_eq!(client.config().max_retries, 3);
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }
}
