//! # Event Key Cache
//!
//! Resolves the key declared by an [`Event`] type and caches the outcome per
//! `TypeId`. Invalid declarations are cached too, so a bad declaration is
//! validated and logged once.

use std::any::{type_name, TypeId};
use std::sync::OnceLock;

use dashmap::DashMap;
use tracing::warn;

use crate::error::{EventBusError, Result};
use crate::key::{InvalidKeyError, Key};

use super::Event;

static KEY_CACHE: OnceLock<DashMap<TypeId, Option<Key>>> = OnceLock::new();

fn cache() -> &'static DashMap<TypeId, Option<Key>> {
    KEY_CACHE.get_or_init(DashMap::new)
}

/// Validate the key declared by `E` without touching the cache
pub fn declared_key<E: Event>() -> std::result::Result<Key, InvalidKeyError> {
    Key::new(E::NAMESPACE, E::VALUE)
}

/// Key declared by `E`, or `None` if the declaration is invalid
pub fn resolve_key<E: Event>() -> Option<Key> {
    let type_id = TypeId::of::<E>();
    if let Some(cached) = cache().get(&type_id) {
        return cached.value().clone();
    }

    cache()
        .entry(type_id)
        .or_insert_with(|| match declared_key::<E>() {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(
                    event_type = type_name::<E>(),
                    namespace = E::NAMESPACE,
                    value = E::VALUE,
                    error = %e,
                    "Event type declares an invalid key"
                );
                None
            }
        })
        .value()
        .clone()
}

/// Like [`resolve_key`] but reports a missing key as an error
pub fn key_for<E: Event>() -> Result<Key> {
    resolve_key::<E>().ok_or(EventBusError::UnkeyedEvent {
        event_type: type_name::<E>(),
    })
}

pub fn clear_key_cache() {
    cache().clear();
}

pub fn cached_key_count() -> usize {
    cache().len()
}
