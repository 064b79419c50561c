//! Shared constants used across the application.

use std::time::Duration;

/// Number of items requested per page, by both the relay defaults and the
/// session controller.
pub const PAGE_SIZE: u32 = 20;

/// Quiet period after the last keystroke before a query is fetched.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(SEARCH_DEBOUNCE_MS);

/// Upstream value of `trending_datetime` for items that never trended.
pub const NOT_TRENDING: &str = "0000-00-00 00:00:00";

/// Upstream API base. Endpoints are `{base}/trending` and `{base}/search`.
pub const DEFAULT_GIPHY_BASE_URL: &str = "https://api.giphy.com/v1/gifs";

/// Relay base URL the terminal client talks to by default.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api";

/// User agent sent on outbound requests.
pub const USER_AGENT: &str = concat!("gif-explorer/", env!("CARGO_PKG_VERSION"));
