use crate::error::{ScraperError, TransportError};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::sleep;

/// User agents to rotate through to avoid bot detection
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Configuration for the retrying HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: usize,
    /// Base delay; retry `n` waits `n` times this long
    pub retry_delay_ms: u64,
    pub enable_cookies: bool,
    pub enable_gzip: bool,
    pub referer: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay_ms: 1000,
            enable_cookies: true,
            enable_gzip: true,
            referer: None,
        }
    }
}

/// HTTP client that retries transient failures with a linearly growing delay
#[derive(Clone)]
pub struct EnhancedHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl EnhancedHttpClient {
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, ScraperError> {
        // Browser-like defaults so the upstream serves the regular page
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Some(referer) = &config.referer {
            let value = HeaderValue::from_str(referer)
                .map_err(|e| ScraperError::Config(format!("invalid referer `{}`: {}", referer, e)))?;
            headers.insert(REFERER, value);
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .cookie_store(config.enable_cookies)
            .gzip(config.enable_gzip)
            .brotli(config.enable_gzip)
            .default_headers(headers)
            .build()
            .map_err(|e| ScraperError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn random_user_agent() -> &'static str {
        let index = rand::thread_rng().gen_range(0..USER_AGENTS.len());
        USER_AGENTS[index]
    }

    /// Delay applied before retry number `retries` (1-based)
    pub fn retry_delay(&self, retries: usize) -> Duration {
        Duration::from_millis(self.config.retry_delay_ms.saturating_mul(retries as u64))
    }

    /// Fetch a URL and return the body, retrying transient failures
    pub async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let mut retries = 0;

        loop {
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(e) if retries < self.config.max_retries && e.is_transient() => {
                    retries += 1;
                    log::warn!(
                        "Request failed, retrying ({}/{}): {} - {}",
                        retries,
                        self.config.max_retries,
                        url,
                        e
                    );
                    sleep(self.retry_delay(retries)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, url: &str) -> Result<String, TransportError> {
        log::debug!("Making request to: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, Self::random_user_agent())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(url, status));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url, &e))
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = EnhancedHttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_random_user_agent() {
        let ua = EnhancedHttpClient::random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
    }

    #[test]
    fn test_retry_delay_grows_linearly() {
        let client = EnhancedHttpClient::with_config(HttpClientConfig {
            retry_delay_ms: 1000,
            ..HttpClientConfig::default()
        })
        .unwrap();

        assert_eq!(client.retry_delay(1), Duration::from_millis(1000));
        assert_eq!(client.retry_delay(2), Duration::from_millis(2000));
        assert_eq!(client.retry_delay(3), Duration::from_millis(3000));
        assert!(client.retry_delay(2) > client.retry_delay(1));
        assert!(client.retry_delay(3) > client.retry_delay(2));
    }

    #[test]
    fn test_invalid_referer_is_rejected() {
        let result = EnhancedHttpClient::with_config(HttpClientConfig {
            referer: Some("bad\nvalue".to_string()),
            ..HttpClientConfig::default()
        });
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }
}
