//! Event and collection access
//!
//! An [`Event`] stores its products as labelled collections. Products are
//! looked up by [`InputTag`] and come back as a [`Handle`], which carries the
//! producer's validity flag. A label that is not present yields an invalid
//! handle rather than an error, so the selector decides what to do with it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::types::{Candidate, EventId, MissingEnergy};
use crate::Result;

/// Label under which a collection is stored in an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputTag(String);

impl InputTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputTag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A product collection as delivered by the producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Whether the producer marked the collection usable
    #[serde(default = "default_true")]
    pub valid: bool,

    /// Items in producer order
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    /// Create a valid collection
    pub fn new(items: Vec<T>) -> Self {
        Self { valid: true, items }
    }

    /// Create a collection the producer flagged as unusable
    pub fn invalid() -> Self {
        Self {
            valid: false,
            items: Vec::new(),
        }
    }

    pub fn handle(&self) -> Handle<'_, T> {
        Handle {
            valid: self.valid,
            items: &self.items,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Borrowed view of a collection together with its validity flag
#[derive(Debug)]
pub struct Handle<'a, T> {
    valid: bool,
    items: &'a [T],
}

impl<'a, T> Handle<'a, T> {
    /// Wrap a slice as a valid collection
    pub fn from_slice(items: &'a [T]) -> Self {
        Self { valid: true, items }
    }

    /// Handle for a product that is missing or unusable
    pub fn invalid() -> Self {
        Self {
            valid: false,
            items: &[],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }
}

impl<T> Clone for Handle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<'_, T> {}

/// One collision event with its labelled products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    id: EventId,

    /// Electron collections by label
    #[serde(default)]
    electrons: BTreeMap<InputTag, Collection<Candidate>>,

    /// Missing-energy collections by label
    #[serde(default)]
    mets: BTreeMap<InputTag, Collection<MissingEnergy>>,
}

impl Event {
    /// Create an event with no products
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            electrons: BTreeMap::new(),
            mets: BTreeMap::new(),
        }
    }

    /// Store an electron collection under a label
    pub fn with_electrons(mut self, tag: impl Into<InputTag>, collection: Collection<Candidate>) -> Self {
        self.electrons.insert(tag.into(), collection);
        self
    }

    /// Store a missing-energy collection under a label
    pub fn with_mets(mut self, tag: impl Into<InputTag>, collection: Collection<MissingEnergy>) -> Self {
        self.mets.insert(tag.into(), collection);
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Look up an electron collection; missing labels give an invalid handle
    pub fn electrons(&self, tag: &InputTag) -> Handle<'_, Candidate> {
        self.electrons
            .get(tag)
            .map(Collection::handle)
            .unwrap_or_else(Handle::invalid)
    }

    /// Look up a missing-energy collection; missing labels give an invalid handle
    pub fn mets(&self, tag: &InputTag) -> Handle<'_, MissingEnergy> {
        self.mets
            .get(tag)
            .map(Collection::handle)
            .unwrap_or_else(Handle::invalid)
    }
}

/// Sequential provider of events
pub trait EventSource {
    /// Next event, or `None` once the stream is exhausted
    ///
    /// An error is a failure of the provider itself and ends the run.
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// In-memory event stream
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    events: VecDeque<Event>,
}

impl MemorySource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl From<Vec<Event>> for MemorySource {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

impl EventSource for MemorySource {
    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.events.pop_front())
    }
}
