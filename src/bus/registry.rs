//! # Registration Table
//!
//! Shared state behind every [`EventBus`](super::EventBus): registrations
//! indexed both by [`Key`] and by Rust type. The key index is authoritative;
//! the type index is a lookup shortcut for the publish path.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::registration::{downcast, ErasedRegistration, EventRegistration};
use crate::error::{EventBusError, Result};
use crate::events::{key_for, Event};
use crate::key::Key;

#[derive(Default)]
pub struct RegistrationTable {
    by_key: DashMap<Key, Arc<dyn ErasedRegistration>>,
    by_type: DashMap<TypeId, Arc<dyn ErasedRegistration>>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration for `E`, created on first use
    ///
    /// Creation is atomic per key: concurrent callers all receive the same
    /// registration. A key that is already registered for a different type
    /// yields [`EventBusError::KeyConflict`].
    pub fn get_or_create<E: Event>(&self) -> Result<Arc<EventRegistration<E>>> {
        if let Some(existing) = self.get::<E>() {
            return Ok(existing);
        }

        let key = key_for::<E>()?;
        let erased = Arc::clone(
            self.by_key
                .entry(key.clone())
                .or_insert_with(|| {
                    debug!(key = %key, event_type = type_name::<E>(), "Created event registration");
                    Arc::new(EventRegistration::<E>::new(key.clone())) as Arc<dyn ErasedRegistration>
                })
                .value(),
        );

        if erased.event_type_id() != TypeId::of::<E>() {
            warn!(
                key = %key,
                registered = erased.event_type(),
                requested = type_name::<E>(),
                "Event key is already registered for another type"
            );
            return Err(Self::conflict::<E>(&key, erased.event_type()));
        }

        self.by_type
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Arc::clone(&erased));

        let registered = erased.event_type();
        downcast::<E>(erased).ok_or_else(|| Self::conflict::<E>(&key, registered))
    }

    /// Registration for `E`, if one exists
    pub fn get<E: Event>(&self) -> Option<Arc<EventRegistration<E>>> {
        let erased = self
            .by_type
            .get(&TypeId::of::<E>())
            .map(|entry| Arc::clone(entry.value()))?;
        downcast::<E>(erased)
    }

    /// Registration under `key`, if it exists and belongs to `E`
    pub fn get_by_key<E: Event>(&self, key: &Key) -> Option<Arc<EventRegistration<E>>> {
        self.get_erased(key).and_then(downcast::<E>)
    }

    pub fn get_erased(&self, key: &Key) -> Option<Arc<dyn ErasedRegistration>> {
        self.by_key.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.by_key.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// All registrations, sorted by key
    pub fn registrations(&self) -> Vec<Arc<dyn ErasedRegistration>> {
        let mut registrations: Vec<_> = self
            .by_key
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        registrations.sort_by(|a, b| a.key().cmp(b.key()));
        registrations
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    fn conflict<E: Event>(key: &Key, registered: &'static str) -> EventBusError {
        EventBusError::KeyConflict {
            key: key.to_string(),
            registered,
            requested: type_name::<E>(),
        }
    }
}

impl fmt::Debug for RegistrationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationTable")
            .field("keys", &self.keys())
            .finish()
    }
}
