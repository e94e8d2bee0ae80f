//! WenuFilter Core
//!
//! Core types, traits, and utilities shared across the WenuFilter crates.
//!
//! This crate provides:
//! - Per-event value types (electron candidates, missing energy, identifiers)
//! - The fixed-schema selection record emitted for accepted events
//! - Error types and result handling
//! - The event/collection interface the selector reads from
//! - A JSON-lines event source and the luminosity-section mask

pub mod error;
pub mod event;
pub mod lumi;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use event::{Collection, Event, EventSource, Handle, InputTag, MemorySource};
pub use lumi::LumiMask;
pub use source::JsonLinesSource;
pub use types::{Candidate, EventId, MissingEnergy, RegionFlags, RegionTag, SelectionRecord};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::event::{Collection, Event, EventSource, Handle, InputTag};
    pub use crate::types::{Candidate, EventId, MissingEnergy, RegionFlags, RegionTag, SelectionRecord};
}
