//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page skeleton
//! - `search`: Search input with clear button
//! - `details`: Detail panel for the selected GIF

pub mod details;
pub mod layout;
pub mod search;

pub use details::{DetailsPanel, DETAIL_SLOTS};
pub use layout::BaseLayout;
pub use search::SearchBar;
