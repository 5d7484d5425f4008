//! Canonical hook-event name constants
//!
//! A thin alias over [`crate::hook_events::event_constants`] so call sites that
//! reference `maos_core::hook_constants::*` (the naming most of the `maos`
//! binary crate uses) and call sites that reference
//! `maos_core::hook_events::event_constants::*` resolve to the exact same
//! strings. Keeping one real definition (in `hook_events`) avoids two
//! independently-maintained sets of event-name literals drifting apart.

pub use crate::hook_events::event_constants::*;
