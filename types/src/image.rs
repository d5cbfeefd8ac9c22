//! Lifecycle types for deferred images.

/// Load phase of a deferred image.
///
/// Transitions exactly once out of `Pending`: either
/// `Pending -> Loading -> {Loaded | Failed}` or directly
/// `Pending -> Loaded` on the cache-hit fast path. An image never
/// re-enters `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImagePhase {
    #[default]
    Pending,
    Loading,
    Loaded,
    Failed,
}

impl ImagePhase {
    /// Whether the image has reached a final phase. Terminal phases are
    /// never left, so completion signals arriving afterwards are ignored.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// Final outcome signalled by the host for an in-flight image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Visual state of the placeholder wrapper around a deferred image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderState {
    /// Skeleton with the blink animation, shown while the load is pending.
    #[default]
    Blinking,
    /// Resource arrived; the wrapper shows the loaded image.
    Loaded,
    /// Load failed; the blink stops and the inline fallback is shown.
    Failed,
}
