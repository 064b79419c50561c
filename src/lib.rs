//! GIF Explorer library.
//!
//! A relay that forwards trending and search requests to the Giphy API with
//! a server-held key, a browser page that scrolls through the results, and
//! the session controller that drives paging from a client.

pub mod browse;
pub mod components;
pub mod config;
pub mod constants;
pub mod giphy;
pub mod session;
pub mod web;
