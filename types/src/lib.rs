//! Core domain types for Vitrine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the presentation engine.

mod countdown;
mod filter;
mod image;
mod item;

pub use countdown::{CountdownPhase, Remaining, TimeOrigin};
pub use filter::{RenderFilter, Tag, TagFilter, collect_tags};
pub use image::{ImagePhase, LoadOutcome, PlaceholderState};
pub use item::{ContentItem, ItemId};
