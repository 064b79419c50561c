//! Search box with its clear button.

use maud::{html, Markup, Render};

/// Text input driving the search session, plus a clear button that the page
/// script shows only while the box has content.
#[derive(Debug, Clone)]
pub struct SearchBar<'a> {
    /// Input id attribute
    pub id: &'a str,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub fn new(id: &'a str) -> Self {
        Self { id }
    }
}

impl Render for SearchBar<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="search-container" {
                input
                    type="text"
                    id=(self.id)
                    class="search-input"
                    placeholder="Search for GIFs..."
                    autocomplete="off"
                    aria-label="Search GIFs";
                button type="button" id="clear-button" class="clear-button" hidden {
                    "Clear"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_bar_starts_empty_with_clear_hidden() {
        let html = SearchBar::new("search-input").render().into_string();
        assert!(html.contains(r#"id="search-input""#));
        assert!(html.contains(r#"placeholder="Search for GIFs...""#));
        assert!(!html.contains("value="));
        assert!(html.contains(r#"id="clear-button" class="clear-button" hidden"#));
    }
}
