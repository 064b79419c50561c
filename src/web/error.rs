//! Error responses for the relay endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::giphy::UpstreamError;

/// Which relay operation failed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Trending,
    Search,
}

impl Operation {
    /// Message shown to callers when the upstream call fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Trending => "Failed to fetch trending GIFs",
            Self::Search => "Failed to search GIFs",
        }
    }

    const fn log_message(self) -> &'static str {
        match self {
            Self::Trending => "Error fetching trending GIFs",
            Self::Search => "Error searching GIFs",
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    /// The search endpoint was called without a query.
    #[error("Search query is required")]
    InvalidRequest,

    /// Any failure reaching or reading the upstream API.
    #[error("{}", .operation.failure_message())]
    UpstreamFailure {
        operation: Operation,
        #[source]
        source: UpstreamError,
    },
}

impl RelayError {
    #[must_use]
    pub fn upstream(operation: Operation, source: UpstreamError) -> Self {
        Self::UpstreamFailure { operation, source }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every relay error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let Self::UpstreamFailure { operation, source } = &self {
            tracing::error!(error = %source, "{}", operation.log_message());
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
