//! Capability traits abstracting the surrounding page.
//!
//! The engine never touches markup directly. The host implements these
//! traits over its element handles and delivers events back through the
//! [`PageController`](crate::page::PageController). Each surface is owned
//! by exactly one engine component, so no element is mutated from two
//! places.

use vitrine_types::{ContentItem, PlaceholderState, Remaining};

/// Key identifying one deferred image within a specific render pass.
///
/// A key carries the pass that minted it, so a re-render invalidates
/// every previous key along with the cards: a late event whose position
/// is reused by a fresh card still fails the pass check and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageKey {
    pass: u64,
    index: usize,
}

impl ImageKey {
    #[must_use]
    pub const fn new(pass: u64, index: usize) -> Self {
        Self { pass, index }
    }

    /// The render pass that minted this key.
    #[must_use]
    pub const fn pass(self) -> u64 {
        self.pass
    }

    /// Position of the card within its render pass.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Handle to one deferred image element and its placeholder wrapper.
pub trait ImageSurface {
    /// The real source, carried in a data attribute until load begins.
    fn deferred_source(&self) -> Option<String>;

    /// Whether the resource is already fully available (decoded
    /// dimensions present). True means a cache hit: no fetch is needed.
    fn resource_complete(&self) -> bool;

    /// Set the element's source, starting the fetch. The host delivers
    /// the outcome later as a single load-or-error signal.
    fn begin_fetch(&mut self, url: &str);

    /// Drive the wrapper's visual state. Hosts without a wrapper may
    /// treat this as a no-op.
    fn set_placeholder(&mut self, state: PlaceholderState);

    /// Whether a placeholder wrapper exists around the image.
    fn has_wrapper(&self) -> bool;

    /// Force the bare image visible (success path without a wrapper).
    fn force_visible(&mut self);

    /// Replace the image source with an inline failure graphic and force
    /// it visible. Terminal: no retry follows.
    fn show_failure(&mut self, fallback_url: &str);
}

/// Viewport-proximity capability.
///
/// The host invokes proximity callbacks asynchronously whenever viewport
/// geometry changes, applying a lookahead margin so loading begins
/// slightly before the element is visible. The margin comes from
/// [`SiteConfig::lookahead_px`](crate::config::SiteConfig::lookahead_px)
/// ([`DEFAULT_LOOKAHEAD_PX`](crate::lazy::DEFAULT_LOOKAHEAD_PX) when
/// unconfigured); the engine never measures geometry itself. Hosts
/// without this capability pass `None` to the scheduler, which then
/// loads eagerly.
pub trait ProximityObserver {
    fn observe(&mut self, key: ImageKey);
    fn unobserve(&mut self, key: ImageKey);
}

/// The card grid container.
pub trait CardHost {
    type Surface: ImageSurface;

    /// Remove every previously rendered card. Re-rendering fully replaces
    /// the visible set rather than patching it.
    fn clear(&mut self);

    /// Append one card for `item`, linking to `href`, and return the
    /// surface for its deferred image. `key` identifies the image in the
    /// events the host delivers back for this render pass.
    fn append_card(&mut self, item: &ContentItem, href: &str, key: ImageKey) -> Self::Surface;
}

/// The countdown's own display elements.
pub trait CountdownDisplay {
    /// Show the numeric countdown.
    fn show_remaining(&mut self, remaining: Remaining);

    /// Swap in the terminal "available now" content: the call-to-action
    /// plus the release-channel-availability note. Shown exactly once.
    fn show_reached(&mut self);
}
