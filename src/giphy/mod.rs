//! Upstream media API client.

pub mod models;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::{PAGE_SIZE, USER_AGENT};

pub use models::{MediaItem, Meta, PagedResult, Pagination, Rating, Rendition};

/// Failure talking to the upstream API.
///
/// Messages never include the request URL, which carries the credential.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
    #[error("upstream returned an undecodable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Pagination window forwarded upstream exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: String,
    pub offset: String,
}

impl PageWindow {
    /// Build a window, filling in `limit=20` and `offset=0` when absent.
    #[must_use]
    pub fn new(limit: Option<String>, offset: Option<String>) -> Self {
        Self {
            limit: limit.unwrap_or_else(|| PAGE_SIZE.to_string()),
            offset: offset.unwrap_or_else(|| "0".to_string()),
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Client for the trending and search endpoints.
///
/// Cheap to clone; every request carries the configured credential.
#[derive(Clone)]
pub struct GiphyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GiphyClient {
    /// Create a client from the relay configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            client,
            base_url: config.giphy_base_url.trim_end_matches('/').to_string(),
            api_key: config.giphy_key.clone(),
        })
    }

    /// Fetch a page of trending items.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that is not JSON.
    pub async fn trending(&self, window: &PageWindow) -> Result<Value, UpstreamError> {
        self.get(
            "trending",
            &[("limit", window.limit.as_str()), ("offset", window.offset.as_str())],
        )
        .await
    }

    /// Fetch a page of items matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that is not JSON.
    pub async fn search(&self, query: &str, window: &PageWindow) -> Result<Value, UpstreamError> {
        self.get(
            "search",
            &[
                ("q", query),
                ("limit", window.limit.as_str()),
                ("offset", window.offset.as_str()),
            ],
        )
        .await
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(endpoint = %endpoint, params = ?params, "Calling upstream");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Decode(e.without_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        let window = PageWindow::default();
        assert_eq!(window.limit, "20");
        assert_eq!(window.offset, "0");
    }

    #[test]
    fn test_page_window_passes_values_through() {
        let window = PageWindow::new(Some("abc".to_string()), Some("-5".to_string()));
        assert_eq!(window.limit, "abc");
        assert_eq!(window.offset, "-5");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config {
            giphy_base_url: "http://localhost:9/v1/gifs/".to_string(),
            ..Config::for_testing()
        };
        let client = GiphyClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/v1/gifs");
    }
}
