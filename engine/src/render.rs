//! Building the visible card list from the source collection.
//!
//! Selection is a pure function of `(items, filter)`: filter by tag, then
//! a stable sort on date. Rendering replaces the previous visible set
//! entirely rather than patching it; at the domain's list sizes the
//! simplicity is worth more than incremental diffing.

use vitrine_types::{ContentItem, ItemId, RenderFilter};

use crate::host::{CardHost, ImageKey};
use crate::placeholder::DeferredImage;

/// One rendered card: the navigation target plus the deferred image it
/// exclusively owns. `key` ties host events to this card for the
/// lifetime of the render pass that produced it.
#[derive(Debug)]
pub struct Card<S> {
    pub key: ImageKey,
    pub id: ItemId,
    pub href: String,
    pub image: DeferredImage<S>,
}

/// Select and order the items to show.
///
/// Keeps an item iff the filter tag is `all` or appears in the item's tag
/// set, then sorts by date (descending for newest-first). The sort is
/// stable: items with identical dates retain their filtered order.
#[must_use]
pub fn visible_items<'a>(items: &'a [ContentItem], filter: &RenderFilter) -> Vec<&'a ContentItem> {
    let mut list: Vec<&ContentItem> = items.iter().filter(|item| filter.retains(item)).collect();
    if filter.newest_first {
        list.sort_by(|a, b| b.date.cmp(&a.date));
    } else {
        list.sort_by(|a, b| a.date.cmp(&b.date));
    }
    list
}

/// Rebuild the card grid for the current filter state.
///
/// Clears the host, appends one card per visible item with its derived
/// link target, and returns the fresh card records keyed to `pass`. The
/// caller hands the new deferred images to the lazy-load scheduler.
pub fn render<H: CardHost>(
    items: &[ContentItem],
    filter: &RenderFilter,
    pass: u64,
    host: &mut H,
) -> Vec<Card<H::Surface>> {
    host.clear();
    let visible = visible_items(items, filter);
    tracing::debug!(
        count = visible.len(),
        tag = filter.tag.as_str(),
        newest_first = filter.newest_first,
        pass,
        "Rendering visible card list"
    );
    visible
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let key = ImageKey::new(pass, index);
            let href = item.page_path();
            let surface = host.append_card(item, &href, key);
            Card {
                key,
                id: item.id,
                href,
                image: DeferredImage::new(surface),
            }
        })
        .collect()
}
