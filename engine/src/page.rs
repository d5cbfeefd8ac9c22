//! Top-level page controller.
//!
//! Owns the filter/sort state and the rendered card set, per the rule that
//! there is no global mutable UI state: the filter is a value held here
//! and mutated only by explicit user-intent events, and every render is a
//! pure derivation from `(items, filter)`.

use vitrine_types::{ContentItem, LoadOutcome, RenderFilter, Tag, TagFilter, collect_tags};

use crate::host::{CardHost, ImageKey, ProximityObserver};
use crate::lazy::LazyLoadScheduler;
use crate::render::{Card, render};

/// An explicit user interaction that mutates the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    SelectTag(TagFilter),
    ToggleSort,
}

/// Owns the content items, the filter state, the rendered cards, and the
/// lazy-load scheduler, and routes host events to the right component.
pub struct PageController<H: CardHost, O> {
    items: Vec<ContentItem>,
    filter: RenderFilter,
    cards: Vec<Card<H::Surface>>,
    scheduler: LazyLoadScheduler,
    host: H,
    observer: Option<O>,
    pass: u64,
}

impl<H, O> PageController<H, O>
where
    H: CardHost,
    O: ProximityObserver,
{
    /// Create the controller. `observer` is `None` on hosts without a
    /// proximity capability, in which case images load eagerly.
    ///
    /// Call [`PageController::render`] once after construction for the
    /// initial view.
    pub fn new(items: Vec<ContentItem>, host: H, observer: Option<O>) -> Self {
        Self {
            items,
            filter: RenderFilter::default(),
            cards: Vec::new(),
            scheduler: LazyLoadScheduler::new(),
            host,
            observer,
            pass: 0,
        }
    }

    /// Rebuild the visible card set for the current filter state and hand
    /// the fresh deferred images to the scheduler. Replaces (and destroys)
    /// the previous cards entirely; every key from the previous pass
    /// becomes stale.
    pub fn render(&mut self) {
        self.pass += 1;
        self.cards = render(&self.items, &self.filter, self.pass, &mut self.host);
        self.scheduler.reset();
        self.scheduler
            .schedule(&mut self.cards, self.observer.as_mut());
    }

    /// Apply a user interaction and re-render.
    pub fn apply(&mut self, intent: UserIntent) {
        match intent {
            UserIntent::SelectTag(tag) => self.filter.tag = tag,
            UserIntent::ToggleSort => self.filter.toggle_sort(),
        }
        self.render();
    }

    /// Proximity callback from the host for one observed image.
    pub fn on_proximity(&mut self, key: ImageKey) {
        if let Some(observer) = self.observer.as_mut() {
            self.scheduler.on_proximity(key, &mut self.cards, observer);
        }
    }

    /// Load-or-error signal from the host for an in-flight image.
    /// Signals from a destroyed render pass are dropped, including keys
    /// whose position is reused by a fresh card.
    pub fn on_image_event(&mut self, key: ImageKey, outcome: LoadOutcome) {
        if let Some(card) = self.cards.get_mut(key.index())
            && card.key == key
        {
            card.image.complete(outcome);
        } else {
            tracing::debug!(?key, "Dropping image event from a destroyed render pass");
        }
    }

    /// Deliver queued cache-hit completions. The host calls this once per
    /// task-queue turn after scheduling work.
    pub fn pump_completions(&mut self) {
        self.scheduler.pump(&mut self.cards);
    }

    #[must_use]
    pub fn filter(&self) -> &RenderFilter {
        &self.filter
    }

    /// Label for the sort-toggle control ("Newest"/"Oldest").
    #[must_use]
    pub const fn sort_label(&self) -> &'static str {
        self.filter.sort_label()
    }

    /// Tag universe for populating the filter selector (excludes the
    /// host-supplied `all` default).
    #[must_use]
    pub fn filter_options(&self) -> Vec<Tag> {
        collect_tags(&self.items)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card<H::Surface>] {
        &self.cards
    }
}
