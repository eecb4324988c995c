//! Observable attribute bags
//!
//! Every addressable entity owns exactly one [`AttributeBag`]. Mutations go
//! through `set`/`unset`, and each one notifies the attached observers
//! synchronously before the mutating call returns.
//!
//! The bag only holds [`Weak`] references to its observers. Whoever created
//! an observer keeps it alive; once it is dropped the bag silently stops
//! notifying it.

use super::event::AttributeChange;
use super::property::{AttributeMap, AttributeValue};
use super::types::Identifier;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

/// Receives a callback after every mutation of an attribute bag it is
/// attached to
pub trait AttributeObserver: Send + Sync {
    fn update(&self, bag: &AttributeBag);
}

/// Mutable key/value store attached to a single entity
pub struct AttributeBag {
    owner: Identifier,
    entries: AttributeMap,
    observers: Vec<Weak<dyn AttributeObserver>>,
    last_change: Option<AttributeChange>,
}

impl AttributeBag {
    /// Create an empty bag for `owner`, with the owner's observer attached
    pub fn new<O: AttributeObserver + 'static>(owner: Identifier, owner_observer: &Arc<O>) -> Self {
        let mut bag = AttributeBag {
            owner,
            entries: AttributeMap::new(),
            observers: Vec::new(),
            last_change: None,
        };
        bag.attach(owner_observer);
        bag
    }

    /// Identifier of the entity owning this bag
    pub fn owner(&self) -> Identifier {
        self.owner
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Set an attribute and notify observers. Returns the previous value.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let key = name.into();
        let new_value = value.into();
        let old_value = self.entries.insert(key.clone(), new_value.clone());

        self.last_change = Some(AttributeChange::Set {
            owner: self.owner,
            key,
            old_value: old_value.clone(),
            new_value,
        });
        self.prune_observers();
        self.dispatch();
        old_value
    }

    /// Remove an attribute and notify observers. Absent keys are a no-op and
    /// send no notification.
    pub fn unset(&mut self, name: &str) -> Option<AttributeValue> {
        let old_value = self.entries.shift_remove(name)?;

        self.last_change = Some(AttributeChange::Unset {
            owner: self.owner,
            key: name.to_string(),
            old_value: old_value.clone(),
        });
        self.prune_observers();
        self.dispatch();
        Some(old_value)
    }

    /// Snapshot of every entry in insertion order
    pub fn to_map(&self) -> AttributeMap {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The mutation behind the current notification. `None` before the first
    /// mutation and during an explicit [`notify`](Self::notify).
    pub fn last_change(&self) -> Option<&AttributeChange> {
        self.last_change.as_ref()
    }

    /// Attach an observer. The bag keeps a weak reference only. Attaching an
    /// observer that is already attached does nothing.
    pub fn attach<O: AttributeObserver + 'static>(&mut self, observer: &Arc<O>) {
        let target = Arc::as_ptr(observer) as *const ();
        if self
            .observers
            .iter()
            .any(|weak| weak.as_ptr() as *const () == target)
        {
            return;
        }
        let weak: Weak<O> = Arc::downgrade(observer);
        self.observers.push(weak);
    }

    /// Detach a previously attached observer. Returns false if it was not
    /// attached.
    pub fn detach<O: AttributeObserver + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let target = Arc::as_ptr(observer) as *const ();
        let before = self.observers.len();
        self.observers
            .retain(|weak| weak.as_ptr() as *const () != target);
        self.observers.len() != before
    }

    /// Number of attached observers that are still alive
    pub fn observer_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Invoke `update` on every live observer, in attachment order, without
    /// a triggering mutation. Observers see `last_change() == None`.
    pub fn notify(&mut self) {
        self.last_change = None;
        self.prune_observers();
        self.dispatch();
    }

    fn dispatch(&self) {
        trace!(owner = %self.owner, observers = self.observers.len(), "notifying attribute observers");
        for observer in self.observers.iter().filter_map(Weak::upgrade) {
            observer.update(self);
        }
    }

    /// Drop observers whose owners have gone away
    pub fn prune_observers(&mut self) {
        self.observers.retain(|weak| weak.strong_count() > 0);
    }
}

impl fmt::Debug for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeBag")
            .field("owner", &self.owner)
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Serialize for AttributeBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Version counter and modification timestamp of an entity.
///
/// Each entity attaches its revision to its own attribute bag at
/// construction, so every attribute mutation bumps both.
#[derive(Debug)]
pub struct EntityRevision {
    version: AtomicU64,
    created_at: i64,
    updated_at: AtomicI64,
}

impl EntityRevision {
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        EntityRevision {
            version: AtomicU64::new(1),
            created_at: now,
            updated_at: AtomicI64::new(now),
        }
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Creation timestamp (Unix milliseconds)
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last update timestamp (Unix milliseconds)
    pub fn updated_at(&self) -> i64 {
        self.updated_at.load(Ordering::Relaxed)
    }
}

impl Default for EntityRevision {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeObserver for EntityRevision {
    fn update(&self, _bag: &AttributeBag) {
        self.version.fetch_add(1, Ordering::Relaxed);
        self.updated_at
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}
