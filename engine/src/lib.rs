//! Orchestration for the Vitrine presentation engine.
//!
//! # Architecture
//!
//! The engine is headless: every interaction with the surrounding page
//! goes through the capability traits in [`host`], and the host delivers
//! events (proximity, image completion, user intent) back into the
//! [`PageController`]. Components own their state exclusively:
//!
//! - [`render`] rebuilds the visible card set from `(items, filter)` as a
//!   pure function and hands fresh deferred images to the scheduler.
//! - [`lazy`] decides *when* each deferred image begins loading, one-shot
//!   per image, with an eager fallback when no proximity capability exists.
//! - [`placeholder`] drives each image through its skeleton/loaded/failed
//!   visual lifecycle with exactly-once completion.
//! - [`countdown`] runs independently from page load to target-reached,
//!   self-correcting against a remote-or-local reference instant.
//!
//! Execution is single-threaded and cooperative: the host's task and timer
//! queues interleave all work, and no element is ever mutated by two
//! components.

pub mod config;
pub mod countdown;
pub mod host;
pub mod lazy;
pub mod page;
pub mod placeholder;
pub mod render;

pub use config::{ConfigError, SiteConfig};
pub use countdown::{CountdownService, CountdownState, Tick};
pub use host::{CardHost, CountdownDisplay, ImageKey, ImageSurface, ProximityObserver};
pub use lazy::{DEFAULT_LOOKAHEAD_PX, LazyLoadScheduler};
pub use page::{PageController, UserIntent};
pub use placeholder::{BeginLoad, DeferredImage, FAILURE_PLACEHOLDER_URL};
pub use render::{Card, render, visible_items};
