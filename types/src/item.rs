//! Content items: the static update entries the page presents as cards.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::filter::Tag;

/// Numeric identifier for a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single content card.
///
/// Immutable once defined; the full set of items is static for the page
/// session. The serde field names mirror the data shape the host ships
/// (`img`, `dateISO`, `humanDate`).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    pub summary: String,
    #[serde(rename = "img")]
    pub image_url: String,
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
    #[serde(rename = "humanDate")]
    pub display_date: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ContentItem {
    /// Relative navigation target for this item's static page.
    ///
    /// Slug pages are preferred when a slug is present; the numeric id is
    /// the fallback.
    #[must_use]
    pub fn page_path(&self) -> String {
        match &self.slug {
            Some(slug) => format!("items/{slug}.html"),
            None => format!("items/{}.html", self.id),
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
