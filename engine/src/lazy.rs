//! Scheduling of deferred image loads.
//!
//! The scheduler decides *when* each deferred image begins loading. With a
//! proximity observer it registers every image once and starts the load on
//! the proximity callback, deregistering immediately so each image is
//! scheduled exactly once. Without one it loads everything eagerly:
//! correctness takes priority over laziness.
//!
//! The scheduler also carries the completion queue for cache-hit images,
//! drained by [`LazyLoadScheduler::pump`] one task-queue turn after
//! registration.

use std::collections::{HashSet, VecDeque};

use vitrine_types::LoadOutcome;

use crate::host::{ImageKey, ImageSurface, ProximityObserver};
use crate::placeholder::BeginLoad;
use crate::render::Card;

/// Default lookahead margin, in pixels, for proximity observation. Loading
/// begins slightly before an element is visible to hide fetch latency.
pub const DEFAULT_LOOKAHEAD_PX: u32 = 200;

/// Decides when each deferred image in the current card set begins loading.
#[derive(Debug, Default)]
pub struct LazyLoadScheduler {
    registered: HashSet<ImageKey>,
    begun: HashSet<ImageKey>,
    pending_completions: VecDeque<ImageKey>,
}

impl LazyLoadScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous card set. Called on re-render, when the old
    /// cards (and their deferred images) are destroyed.
    pub fn reset(&mut self) {
        self.registered.clear();
        self.begun.clear();
        self.pending_completions.clear();
    }

    /// Register every not-yet-scheduled image in `cards`.
    ///
    /// With an observer, images are observed and load on proximity.
    /// Without one, they load eagerly and immediately, in any order.
    /// Idempotent: a second call with no new images is a no-op.
    pub fn schedule<S, O>(&mut self, cards: &mut [Card<S>], mut observer: Option<&mut O>)
    where
        S: ImageSurface,
        O: ProximityObserver,
    {
        for index in 0..cards.len() {
            let key = cards[index].key;
            if !self.registered.insert(key) {
                continue;
            }
            match observer {
                Some(ref mut obs) => obs.observe(key),
                None => self.begin(key, cards),
            }
        }
    }

    /// Proximity callback for one observed image: stop observing it and
    /// begin its load. One-shot per image.
    pub fn on_proximity<S, O>(&mut self, key: ImageKey, cards: &mut [Card<S>], observer: &mut O)
    where
        S: ImageSurface,
        O: ProximityObserver,
    {
        observer.unobserve(key);
        self.begin(key, cards);
    }

    /// Deliver queued cache-hit completions.
    ///
    /// Runs one turn after the loads that queued them, which guarantees
    /// registration has finished before the loaded transition fires.
    pub fn pump<S: ImageSurface>(&mut self, cards: &mut [Card<S>]) {
        while let Some(key) = self.pending_completions.pop_front() {
            if let Some(card) = cards.get_mut(key.index())
                && card.key == key
            {
                card.image.complete(LoadOutcome::Loaded);
            }
        }
    }

    fn begin<S: ImageSurface>(&mut self, key: ImageKey, cards: &mut [Card<S>]) {
        let Some(card) = cards.get_mut(key.index()) else {
            tracing::debug!(?key, "Load request for a card that no longer exists");
            return;
        };
        if card.key != key {
            tracing::debug!(?key, "Load request from a destroyed render pass");
            return;
        }
        // One-shot per image: a repeated proximity event neither re-arms
        // the placeholder nor queues a duplicate completion.
        if !self.begun.insert(key) {
            return;
        }
        if card.image.begin_load() == BeginLoad::AlreadyComplete {
            self.pending_completions.push_back(key);
        }
    }
}
