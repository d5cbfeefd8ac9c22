//! Tag filtering and sort state for the rendered card list.

use serde::Deserialize;

use crate::item::ContentItem;

/// A lowercase-normalized content tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct Tag(String);

impl Tag {
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label for filter options: first letter capitalized.
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The selected tag filter: everything, or a single tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(Tag),
}

impl TagFilter {
    /// Parse the raw selector value. `"all"` (any case) and the empty
    /// string both select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Tag(Tag::new(trimmed))
        }
    }

    #[must_use]
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => item.has_tag(tag),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Tag(tag) => tag.as_str(),
        }
    }
}

/// Filter and sort state driving the visible list.
///
/// Owned by the page controller and mutated only by explicit user intent;
/// the rendered list is always a pure function of `(items, RenderFilter)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFilter {
    pub tag: TagFilter,
    pub newest_first: bool,
}

impl Default for RenderFilter {
    fn default() -> Self {
        Self {
            tag: TagFilter::All,
            newest_first: true,
        }
    }
}

impl RenderFilter {
    pub fn toggle_sort(&mut self) {
        self.newest_first = !self.newest_first;
    }

    /// Label for the sort-toggle control.
    #[must_use]
    pub const fn sort_label(&self) -> &'static str {
        if self.newest_first { "Newest" } else { "Oldest" }
    }

    #[must_use]
    pub fn retains(&self, item: &ContentItem) -> bool {
        self.tag.matches(item)
    }
}

/// The de-duplicated tag universe across all items, in first-seen order.
///
/// Used to populate the filter selector; the `all` default is supplied by
/// the host and is not part of this list.
#[must_use]
pub fn collect_tags(items: &[ContentItem]) -> Vec<Tag> {
    let mut seen = Vec::new();
    for item in items {
        for tag in &item.tags {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;
    use chrono::NaiveDate;

    fn item(tags: &[&str]) -> ContentItem {
        ContentItem {
            id: ItemId(1),
            slug: None,
            title: "t".to_string(),
            summary: "s".to_string(),
            image_url: "https://example.com/a.jpg".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 26).unwrap(),
            display_date: "October 26, 2025".to_string(),
            version: None,
            tags: tags.iter().map(|t| Tag::new(t)).collect(),
        }
    }

    #[test]
    fn tag_normalizes_case_and_whitespace() {
        assert_eq!(Tag::new("  DevLog "), Tag::new("devlog"));
        assert_eq!(Tag::new("Building").as_str(), "building");
    }

    #[test]
    fn tag_label_capitalizes_first_letter() {
        assert_eq!(Tag::new("devlog").label(), "Devlog");
        assert_eq!(Tag::new("systems").label(), "Systems");
    }

    #[test]
    fn filter_parse_recognizes_all() {
        assert_eq!(TagFilter::parse("all"), TagFilter::All);
        assert_eq!(TagFilter::parse("ALL"), TagFilter::All);
        assert_eq!(TagFilter::parse(""), TagFilter::All);
        assert_eq!(
            TagFilter::parse("devlog"),
            TagFilter::Tag(Tag::new("devlog"))
        );
    }

    #[test]
    fn all_matches_everything() {
        assert!(TagFilter::All.matches(&item(&[])));
        assert!(TagFilter::All.matches(&item(&["devlog"])));
    }

    #[test]
    fn tag_filter_requires_membership() {
        let filter = TagFilter::parse("building");
        assert!(filter.matches(&item(&["devlog", "building"])));
        assert!(!filter.matches(&item(&["devlog", "systems"])));
    }

    #[test]
    fn default_filter_is_all_newest_first() {
        let filter = RenderFilter::default();
        assert_eq!(filter.tag, TagFilter::All);
        assert!(filter.newest_first);
        assert_eq!(filter.sort_label(), "Newest");
    }

    #[test]
    fn toggle_sort_flips_direction_and_label() {
        let mut filter = RenderFilter::default();
        filter.toggle_sort();
        assert!(!filter.newest_first);
        assert_eq!(filter.sort_label(), "Oldest");
        filter.toggle_sort();
        assert!(filter.newest_first);
    }

    #[test]
    fn collect_tags_dedupes_in_first_seen_order() {
        let items = [item(&["devlog", "systems"]), item(&["devlog", "building"])];
        let tags = collect_tags(&items);
        assert_eq!(
            tags,
            vec![Tag::new("devlog"), Tag::new("systems"), Tag::new("building")]
        );
    }
}
