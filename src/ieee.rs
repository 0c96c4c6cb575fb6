//! IEEE Xplore REST search client.
//!
//! Pages through `POST /rest/search` one request at a time, normalizing each
//! returned record until the requested count is reached or the service runs
//! out of results.
//!
//! Failures are not retried: a transport error or non-success status on any
//! page aborts the whole fetch and the records collected so far are dropped.

use crate::config::XploreConfig;
use crate::error::{Result, XploreError};
use crate::record::{normalize_with_origin, CanonicalRecord};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Fixed `returnType` marker sent with every page request
const RETURN_TYPE: &str = "SEARCH";

/// Body of one page request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query_text: String,
    pub highlight: bool,
    pub return_type: String,
    pub rows_per_page: usize,
    pub page_number: usize,
    #[serde(rename = "start_year", skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(rename = "end_year", skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
}

impl SearchRequest {
    /// Build the request for the page containing the 1-based `start_record`.
    pub fn for_page(query: &str, start_record: usize, page_size: usize, options: &FetchOptions) -> Self {
        Self {
            query_text: query.to_string(),
            highlight: true,
            return_type: RETURN_TYPE.to_string(),
            rows_per_page: page_size,
            page_number: (start_record - 1) / page_size + 1,
            start_year: options.start_year.map(|y| y.to_string()),
            end_year: options.end_year.map(|y| y.to_string()),
        }
    }
}

/// HTTP collaborator: sends one search request and returns the parsed body.
///
/// Implementations must turn non-success statuses into errors.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Value>;
}

/// `reqwest`-backed transport with session-level default headers
pub struct ReqwestTransport {
    client: reqwest::Client,
    search_url: String,
}

impl ReqwestTransport {
    /// Create a new transport from the crawler configuration
    pub fn new(config: &XploreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.default_headers() {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| XploreError::Config(format!("Invalid header {}: {}", name, e)))?;
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| XploreError::Config(format!("Invalid header name {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                XploreError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| XploreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait]
impl SearchTransport for ReqwestTransport {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .client
            .post(&self.search_url)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(XploreError::Api {
                code: status.as_u16(),
                message: format!("IEEE search error: {}", status),
            });
        }

        Ok(response.json().await?)
    }
}

/// Per-fetch options
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Stop once this many records are collected
    pub max_records: usize,
    /// Publication year lower bound
    pub start_year: Option<i32>,
    /// Publication year upper bound
    pub end_year: Option<i32>,
    /// Pause after every non-empty page
    pub inter_page_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_records: 100,
            start_year: None,
            end_year: None,
            inter_page_delay: Duration::from_millis(800),
        }
    }
}

impl FetchOptions {
    fn validate(&self) -> Result<()> {
        if self.max_records == 0 {
            return Err(XploreError::Validation(
                "max_records must be positive".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if start > end {
                return Err(XploreError::Validation(format!(
                    "start_year {} is after end_year {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

/// Paginated fetcher over a [`SearchTransport`]
pub struct Fetcher<T> {
    transport: T,
    config: XploreConfig,
}

impl Fetcher<ReqwestTransport> {
    /// Create a fetcher talking to the live endpoint described by `config`
    pub fn from_config(config: XploreConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: SearchTransport> Fetcher<T> {
    pub fn new(transport: T, config: XploreConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &XploreConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch up to `options.max_records` normalized records for `query`.
    ///
    /// # Errors
    ///
    /// Returns the first transport or status error; nothing collected before
    /// it is returned.
    pub async fn fetch(&self, query: &str, options: &FetchOptions) -> Result<Vec<CanonicalRecord>> {
        if query.trim().is_empty() {
            return Err(XploreError::Validation("query must not be empty".to_string()));
        }
        options.validate()?;

        let page_size = self.config.page_size.max(1);

        info!(
            query = query,
            max_records = options.max_records,
            start_year = ?options.start_year,
            end_year = ?options.end_year,
            "Starting IEEE Xplore query"
        );

        let mut records = Vec::new();
        let mut start_record = 1;

        while records.len() < options.max_records {
            let request = SearchRequest::for_page(query, start_record, page_size, options);
            debug!(page = request.page_number, start_record = start_record, "Fetching page");

            let data = self.transport.search(&request).await?;
            let page = match data.get("records").and_then(Value::as_array) {
                Some(page) if !page.is_empty() => page,
                _ => {
                    debug!(page = request.page_number, "Empty page, no more results");
                    break;
                }
            };

            for item in page {
                records.push(normalize_with_origin(item, query, &self.config.base_origin));
                if records.len() >= options.max_records {
                    break;
                }
            }

            info!(
                page = request.page_number,
                count = page.len(),
                total = records.len(),
                "Parsed IEEE results"
            );

            // Advances by what the service returned, not by the page size.
            start_record += page.len();
            tokio::time::sleep(options.inter_page_delay).await;
        }

        info!(total = records.len(), "IEEE Xplore query complete");
        Ok(records)
    }
}
