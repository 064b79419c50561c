use axum::extract::{RawQuery, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use maud::Markup;
use serde_json::Value;
use url::form_urlencoded;

use super::error::{Operation, RelayError};
use super::pages;
use super::AppState;
use crate::giphy::PageWindow;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(health))
        .route("/api/trending", get(api_trending))
        .route("/api/search", get(api_search))
}

// ========== HTML Routes ==========

async fn home() -> Markup {
    pages::render_home_page()
}

async fn health() -> impl IntoResponse {
    "ok"
}

// ========== Relay Routes ==========

/// Relay query parameters, kept as raw strings so they reach upstream
/// unchanged.
///
/// Parsing never fails: unknown keys are ignored and a repeated key keeps
/// its first value.
#[derive(Debug, Default, PartialEq, Eq)]
struct RelayParams {
    q: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

impl RelayParams {
    fn parse(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    fn window(&mut self) -> PageWindow {
        PageWindow::new(self.limit.take(), self.offset.take())
    }
}

async fn api_trending(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, RelayError> {
    let window = RelayParams::parse(raw.as_deref()).window();

    let body = state
        .giphy
        .trending(&window)
        .await
        .map_err(|e| RelayError::upstream(Operation::Trending, e))?;

    Ok(Json(body))
}

async fn api_search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, RelayError> {
    let mut params = RelayParams::parse(raw.as_deref());
    // Presence check only: whitespace-only queries are forwarded.
    let query = match params.q.take() {
        Some(q) if !q.is_empty() => q,
        _ => return Err(RelayError::InvalidRequest),
    };
    let window = params.window();

    let body = state
        .giphy
        .search(&query, &window)
        .await
        .map_err(|e| RelayError::upstream(Operation::Search, e))?;

    Ok(Json(body))
}
