//! Base layout components for the web UI.
//!
//! This module provides the page skeleton: head, header and script tags.

use maud::{html, Markup, DOCTYPE};

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let page = BaseLayout::new("Explore")
///     .with_script("/static/js/explorer.js")
///     .render(html! { input; }, html! { p { "Hello" } });
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    scripts: Vec<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            scripts: Vec::new(),
        }
    }

    /// Add an external script, loaded at the end of the body.
    #[must_use]
    pub fn with_script(mut self, src: &'a str) -> Self {
        self.scripts.push(src);
        self
    }

    /// Render the complete HTML page.
    ///
    /// `header` is placed inside `<header class="app-header">` below the
    /// site title; `content` follows the header.
    #[must_use]
    pub fn render(self, header: Markup, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="dark";
                    title { (self.title) " - GIF Explorer" }
                    link rel="stylesheet" href="/static/css/style.css";
                    link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🎞</text></svg>";
                }
                body {
                    div class="app" {
                        header class="app-header" {
                            h1 { "GIF Explorer" }
                            (header)
                        }
                        (content)
                    }
                    @for src in &self.scripts {
                        script src=(src) {}
                    }
                }
            }
        }
    }
}
