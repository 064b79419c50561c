//! Detail panel for the selected GIF.
//!
//! Rendered empty and hidden; the page script fills the slots (identified by
//! `data-slot`) when an item is selected.

use maud::{html, Markup, Render};

/// Slot names the page script writes into.
pub const DETAIL_SLOTS: [&str; 8] = [
    "image",
    "title",
    "rating",
    "creator",
    "source",
    "uploaded",
    "trending",
    "actions",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DetailsPanel;

impl Render for DetailsPanel {
    fn render(&self) -> Markup {
        html! {
            aside id="gif-details" class="gif-details" hidden {
                div class="gif-details-header" {
                    h2 { "GIF Details" }
                    button type="button" id="close-details" class="close-button" aria-label="Close details" { "×" }
                }
                div class="gif-details-content" {
                    div class="gif-preview" {
                        img class="gif-preview-image" data-slot="image" alt="";
                    }
                    div class="gif-info" {
                        h3 data-slot="title" {}
                        div class="gif-metadata" {
                            p data-slot="rating" { strong { "Rating:" } " " span {} }
                            p data-slot="creator" hidden { strong { "Creator:" } " " span {} }
                            p data-slot="source" hidden {
                                strong { "Source:" } " "
                                a target="_blank" rel="noopener noreferrer" {}
                            }
                            p data-slot="uploaded" { strong { "Uploaded:" } " " span {} }
                            p data-slot="trending" hidden { strong { "Trending since:" } " " span {} }
                        }
                        div class="gif-actions" data-slot="actions" {
                            a class="action-button" data-action="permalink" target="_blank" rel="noopener noreferrer" {
                                "View on Giphy"
                            }
                            a class="action-button" data-action="download" target="_blank" rel="noopener noreferrer" {
                                "Download Original"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_panel_has_every_slot() {
        let html = DetailsPanel.render().into_string();
        for slot in DETAIL_SLOTS {
            assert!(
                html.contains(&format!(r#"data-slot="{slot}""#)),
                "missing slot {slot}"
            );
        }
    }

    #[test]
    fn test_details_panel_starts_hidden() {
        let html = DetailsPanel.render().into_string();
        assert!(html.starts_with(r#"<aside id="gif-details" class="gif-details" hidden>"#));
        assert!(html.contains("View on Giphy"));
        assert!(html.contains("Download Original"));
    }
}
