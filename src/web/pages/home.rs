//! The explorer page: search box, infinite grid and detail panel.

use maud::{html, Markup};

use crate::components::{BaseLayout, DetailsPanel, SearchBar};
use crate::constants::{PAGE_SIZE, SEARCH_DEBOUNCE_MS};

/// Path prefix of the relay endpoints, as seen from the browser.
const API_BASE: &str = "/api";

/// Render the explorer page.
///
/// The grid starts empty. `static/js/explorer.js` runs the browsing session
/// against the relay endpoints using the settings in `#app-config`.
#[must_use]
pub fn render_home_page() -> Markup {
    let header = html! {
        div id="selected-title" class="selected-title" hidden {}
        (SearchBar::new("search-input"))
    };

    let content = html! {
        main id="gif-grid" class="gif-container" aria-live="polite" {}
        div id="loading" class="loading" hidden { "Loading more GIFs..." }
        div id="no-more" class="no-more" hidden { "No more GIFs to load" }
        div id="scroll-sentinel" class="scroll-sentinel" aria-hidden="true" {}
        (DetailsPanel)
        div id="app-config" hidden
            data-api-base=(API_BASE)
            data-page-size=(PAGE_SIZE)
            data-debounce-ms=(SEARCH_DEBOUNCE_MS) {}
    };

    BaseLayout::new("Explore")
        .with_script("/static/js/explorer.js")
        .render(header, content)
}
