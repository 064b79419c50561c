//! Typed view of the upstream media records.
//!
//! The relay never decodes these: it hands the upstream body through as-is.
//! Clients (the session controller and the terminal browser) decode pages
//! into these types.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::NOT_TRENDING;

/// Format of `import_datetime` and `trending_datetime`.
const UPSTREAM_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Content rating of a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    G,
    Pg,
    #[serde(rename = "pg-13")]
    Pg13,
    R,
    /// Any rating value not listed above.
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Other => "UNRATED",
        };
        f.write_str(label)
    }
}

/// One encoded rendition of a media item.
///
/// Video-only renditions carry no `url`; it is left empty for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
}

impl Rendition {
    /// Width in pixels, if upstream reported a numeric value.
    #[must_use]
    pub fn width_px(&self) -> Option<u32> {
        self.width.as_deref().and_then(|w| w.parse().ok())
    }

    /// Height in pixels, if upstream reported a numeric value.
    #[must_use]
    pub fn height_px(&self) -> Option<u32> {
        self.height.as_deref().and_then(|h| h.parse().ok())
    }
}

/// A single GIF record with metadata and rendition URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub source_tld: Option<String>,
    #[serde(default)]
    pub import_datetime: String,
    #[serde(default = "not_trending")]
    pub trending_datetime: String,
    #[serde(default)]
    pub images: HashMap<String, Rendition>,
    /// Canonical permalink on the upstream site.
    #[serde(default)]
    pub url: String,
}

impl MediaItem {
    /// Rendition used in the grid.
    #[must_use]
    pub fn fixed_height(&self) -> Option<&Rendition> {
        self.images.get("fixed_height")
    }

    /// Full-size rendition used in the detail view and for downloads.
    #[must_use]
    pub fn original(&self) -> Option<&Rendition> {
        self.images.get("original")
    }

    #[must_use]
    pub fn is_trending(&self) -> bool {
        !self.trending_datetime.is_empty() && self.trending_datetime != NOT_TRENDING
    }

    /// Date the item was uploaded.
    #[must_use]
    pub fn uploaded_on(&self) -> Option<NaiveDate> {
        parse_upstream_date(&self.import_datetime)
    }

    /// Date the item started trending, if it ever did.
    #[must_use]
    pub fn trending_since(&self) -> Option<NaiveDate> {
        if self.is_trending() {
            parse_upstream_date(&self.trending_datetime)
        } else {
            None
        }
    }

    /// Label for the source link: the source domain, or a generic fallback.
    #[must_use]
    pub fn source_label(&self) -> &str {
        self.source_tld.as_deref().unwrap_or("External Link")
    }
}

/// Pagination block returned alongside a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Response status block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub response_id: String,
}

/// One page of results as returned by the relay's endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult {
    pub data: Vec<MediaItem>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

fn parse_upstream_date(value: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(value, UPSTREAM_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

fn not_trending() -> String {
    NOT_TRENDING.to_string()
}

/// Upstream sends `""` for absent optional strings.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
