//! Crawler configuration.
//!
//! Origin, endpoint, page size and session headers live in one immutable
//! [`XploreConfig`] that is built once and handed to the transport and the
//! fetcher.

use crate::error::{Result, XploreError};
use std::time::Duration;
use url::Url;

/// IEEE Xplore web origin, used to absolutize relative document/PDF links
pub const DEFAULT_BASE_ORIGIN: &str = "https://ieeexplore.ieee.org";

/// Search endpoint path relative to the origin
const SEARCH_PATH: &str = "/rest/search";

/// Rows requested per page
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for requests
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Immutable crawler configuration
#[derive(Debug, Clone)]
pub struct XploreConfig {
    /// Web origin without trailing slash (e.g. `https://ieeexplore.ieee.org`)
    pub base_origin: String,
    /// Full search endpoint URL
    pub search_url: String,
    /// Rows per page
    pub page_size: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Proxy URL (e.g., "http://127.0.0.1:7890")
    pub proxy: Option<String>,
}

impl Default for XploreConfig {
    fn default() -> Self {
        Self {
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            search_url: format!("{}{}", DEFAULT_BASE_ORIGIN, SEARCH_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl XploreConfig {
    /// Build a configuration pointing at a mirror origin.
    ///
    /// The search endpoint becomes `<base>/rest/search`.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base)
            .map_err(|e| XploreError::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(XploreError::Config(format!(
                "Base URL must be http(s): {}",
                base
            )));
        }

        Ok(Self {
            base_origin: base.to_string(),
            search_url: format!("{}{}", base, SEARCH_PATH),
            ..Default::default()
        })
    }

    /// Set the proxy
    pub fn proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Session-level headers merged into every page request
    pub fn default_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json, text/plain, */*".to_string()),
            ("Origin", self.base_origin.clone()),
            ("Referer", format!("{}/", self.base_origin)),
        ]
    }
}
