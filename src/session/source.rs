//! Where the session controller gets its pages from.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::state::{Mode, PageRequest};
use crate::constants::USER_AGENT;
use crate::giphy::{MediaItem, PagedResult};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("relay returned status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("failed to decode page: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A paged feed of media items.
#[async_trait]
pub trait MediaSource: Send + Sync + 'static {
    /// Fetch the page described by `request`.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<MediaItem>, ClientError>;
}

/// Fetches pages from a running relay's `/api` endpoints.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    /// Create a client for the relay at `base_url` (e.g. `http://localhost:3001/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a page and keep the relay's full response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn fetch(&self, request: &PageRequest) -> Result<PagedResult, ClientError> {
        let limit = request.limit.to_string();
        let offset = request.offset.to_string();

        let builder = match request.mode {
            Mode::Trending => self
                .client
                .get(format!("{}/trending", self.base_url))
                .query(&[("limit", limit.as_str()), ("offset", offset.as_str())]),
            Mode::Search => self
                .client
                .get(format!("{}/search", self.base_url))
                .query(&[
                    ("q", request.query.as_str()),
                    ("limit", limit.as_str()),
                    ("offset", offset.as_str()),
                ]),
        };

        debug!(mode = ?request.mode, query = %request.query, offset = request.offset, "Fetching page");

        let response = builder.send().await.map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<crate::web::ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_default();
            return Err(ClientError::Status { status, message });
        }

        response.json().await.map_err(ClientError::Decode)
    }
}

#[async_trait]
impl MediaSource for RelayClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<MediaItem>, ClientError> {
        self.fetch(request).await.map(|page| page.data)
    }
}
