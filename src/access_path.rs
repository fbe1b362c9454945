use crate::error::{ScraperError, TransportError};
use crate::http_client::EnhancedHttpClient;
use reqwest::StatusCode;
use serde::Serialize;

/// How a payload reached us
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AccessPath {
    /// Straight to the upstream site
    #[default]
    Direct,
    /// Through the fallback proxy at this index of the candidate list
    Fallback(usize),
}

/// A fetched payload together with the path that produced it
#[derive(Debug)]
pub struct Fetched {
    pub body: String,
    pub path: AccessPath,
}

/// Picks direct access first and escalates to a proxy when the upstream blocks us
#[derive(Clone)]
pub struct AccessPathSelector {
    client: EnhancedHttpClient,
    base_url: String,
    fallback_proxies: Vec<String>,
}

impl AccessPathSelector {
    pub fn new(client: EnhancedHttpClient, base_url: &str, fallback_proxies: Vec<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback_proxies,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL to request for `path` over the given access path
    pub fn resolve_url(&self, path: &str, access: AccessPath) -> String {
        let target = format!("{}/{}", self.base_url, path);
        match access {
            AccessPath::Direct => target,
            AccessPath::Fallback(index) => {
                if self.fallback_proxies.is_empty() {
                    return target;
                }
                let proxy = &self.fallback_proxies[index % self.fallback_proxies.len()];
                format!("{}{}", proxy, urlencoding::encode(&target))
            }
        }
    }

    /// Fetch `path`, going through the first fallback proxy if direct access is refused
    pub async fn fetch(&self, path: &str) -> Result<Fetched, ScraperError> {
        let direct_url = self.resolve_url(path, AccessPath::Direct);

        let err = match self.client.get_text(&direct_url).await {
            Ok(body) => {
                return Ok(Fetched {
                    body,
                    path: AccessPath::Direct,
                })
            }
            Err(e) => e,
        };

        if !err.is_fallback_eligible() || self.fallback_proxies.is_empty() {
            return Err(escalate(err));
        }

        log::info!("Direct access failed, trying with fallback proxy: {}", err);

        let access = AccessPath::Fallback(0);
        let proxied_url = self.resolve_url(path, access);
        match self.client.get_text(&proxied_url).await {
            Ok(body) => Ok(Fetched { body, path: access }),
            Err(proxy_err) => {
                log::warn!("Proxy access failed: {}", proxy_err);
                Err(escalate(proxy_err))
            }
        }
    }
}

/// A 403 that survived every access path means the site is actively blocking us
fn escalate(err: TransportError) -> ScraperError {
    if err.status() == Some(StatusCode::FORBIDDEN) {
        ScraperError::Blocked { url: err.url }
    } else {
        ScraperError::Transport(err)
    }
}
