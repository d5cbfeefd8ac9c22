//! Placeholder lifecycle for a single deferred image.
//!
//! A [`DeferredImage`] owns one [`ImageSurface`] and drives it through the
//! visual states skeleton+blink, loaded, or failed-with-inline-fallback.
//! Completion is exactly-once: the first load-or-error signal wins and
//! every later signal is ignored.
//!
//! The cache-hit fast path never completes inline. When the resource is
//! already decoded at registration time, [`DeferredImage::begin_load`]
//! reports [`BeginLoad::AlreadyComplete`] and the scheduler delivers the
//! loaded transition on its next pump, after registration has finished on
//! every execution order. The guard is structural (the phase machine is
//! armed before any fetch starts) rather than a timing workaround.

use vitrine_types::{ImagePhase, LoadOutcome, PlaceholderState};

use crate::host::ImageSurface;

/// Inline graphic substituted when an image fails to fetch or decode.
pub const FAILURE_PLACEHOLDER_URL: &str = "data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"600\" height=\"400\"><rect width=\"100%\" height=\"100%\" fill=\"%23efefef\"/><text x=\"50%\" y=\"50%\" font-size=\"18\" fill=\"%23666\" text-anchor=\"middle\">Image failed to load</text></svg>";

/// What `begin_load` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginLoad {
    /// Fetch started; the outcome arrives later from the host.
    Fetching,
    /// Resource was already complete. The loaded transition must be
    /// delivered on the next scheduler pump, not inline.
    AlreadyComplete,
    /// Nothing to do: no deferred source, or loading already began.
    Skipped,
}

/// A deferred image and its current lifecycle phase.
///
/// Exclusively owned by the card that created it; dropped with the card
/// when a re-render replaces the visible set.
#[derive(Debug)]
pub struct DeferredImage<S> {
    surface: S,
    phase: ImagePhase,
}

impl<S: ImageSurface> DeferredImage<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            phase: ImagePhase::Pending,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ImagePhase {
        self.phase
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Begin loading this image.
    ///
    /// Idempotent: only a `Pending` image starts anything, so scheduling
    /// the same image twice produces no additional load attempt.
    pub fn begin_load(&mut self) -> BeginLoad {
        if self.phase != ImagePhase::Pending {
            return BeginLoad::Skipped;
        }

        let Some(source) = self.surface.deferred_source() else {
            tracing::debug!("Deferred image has no source attribute, skipping");
            return BeginLoad::Skipped;
        };

        self.surface.set_placeholder(PlaceholderState::Blinking);

        // Cache hit: the phase machine is already armed for `complete`,
        // so the loaded signal is queued instead of fired inline.
        if self.surface.resource_complete() {
            return BeginLoad::AlreadyComplete;
        }

        self.phase = ImagePhase::Loading;
        self.surface.begin_fetch(&source);
        BeginLoad::Fetching
    }

    /// Apply the load outcome. One-shot: the first signal moves the image
    /// into a terminal phase and later signals are ignored.
    pub fn complete(&mut self, outcome: LoadOutcome) {
        if self.phase.is_terminal() {
            return;
        }

        match outcome {
            LoadOutcome::Loaded => {
                self.phase = ImagePhase::Loaded;
                if self.surface.has_wrapper() {
                    self.surface.set_placeholder(PlaceholderState::Loaded);
                } else {
                    self.surface.force_visible();
                }
            }
            LoadOutcome::Failed => {
                self.phase = ImagePhase::Failed;
                tracing::debug!("Image failed to load, substituting inline fallback");
                self.surface.set_placeholder(PlaceholderState::Failed);
                self.surface.show_failure(FAILURE_PLACEHOLDER_URL);
            }
        }
    }
}
