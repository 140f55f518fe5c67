//! # Event Registrations
//!
//! One [`EventRegistration`] exists per event type and bus. It holds the
//! subscriptions of that type as an immutable, priority-sorted snapshot.
//! Subscribing and unsubscribing copy the current list, modify the copy and
//! swap it in under a write lock; dispatch only clones the snapshot `Arc`
//! under a read lock and runs the subscribers without holding any lock.
//! Subscribers may therefore subscribe, unsubscribe or publish re-entrantly,
//! and a change made during a dispatch is only seen by later dispatches.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::snapshot::{RegistrationSnapshot, SubscriptionSnapshot};
use super::subscription::{EventSubscription, SharedSubscriber, SubscriptionId};
use crate::events::Event;
use crate::key::{Key, Keyed};

/// Subscriptions for the event type `E`
pub struct EventRegistration<E: Event> {
    key: Key,
    subscribers: RwLock<Arc<[EventSubscription<E>]>>,
    _event: PhantomData<fn(&mut E)>,
}

impl<E: Event> EventRegistration<E> {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            subscribers: RwLock::new(Arc::from(Vec::new())),
            _event: PhantomData,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Rust type name of the event
    pub fn event_type(&self) -> &'static str {
        type_name::<E>()
    }

    /// Current subscriptions, sorted by ascending priority
    pub fn subscribers(&self) -> Arc<[EventSubscription<E>]> {
        Arc::clone(&*self.subscribers.read())
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a subscription, keeping registration order among equal priorities
    pub fn subscribe(&self, subscription: EventSubscription<E>) -> SubscriptionId {
        let id = subscription.id();
        let priority = subscription.priority();

        let mut guard = self.subscribers.write();
        let mut updated = guard.to_vec();
        updated.push(subscription);
        updated.sort_by_key(EventSubscription::priority);
        *guard = Arc::from(updated);
        let total = guard.len();
        drop(guard);

        debug!(
            key = %self.key,
            subscription_id = %id,
            priority,
            total,
            "Subscribed to event"
        );
        id
    }

    /// Remove the subscription with the given id
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.remove_where(|subscription| subscription.id() == id);
        if removed > 0 {
            debug!(key = %self.key, subscription_id = %id, "Unsubscribed from event");
        }
        removed > 0
    }

    /// Remove every subscription made with this subscriber instance
    pub fn unsubscribe_subscriber(&self, subscriber: &SharedSubscriber<E>) -> usize {
        let removed = self.remove_where(|subscription| subscription.is_subscriber(subscriber));
        if removed > 0 {
            debug!(key = %self.key, removed, "Unsubscribed subscriber from event");
        }
        removed
    }

    fn remove_where(&self, matches: impl Fn(&EventSubscription<E>) -> bool) -> usize {
        let mut guard = self.subscribers.write();
        if !guard.iter().any(&matches) {
            return 0;
        }

        let before = guard.len();
        // Removal preserves the sorted order
        let retained: Vec<_> = guard
            .iter()
            .filter(|subscription| !matches(*subscription))
            .cloned()
            .collect();
        let removed = before - retained.len();
        *guard = Arc::from(retained);
        removed
    }

    /// Run every eligible subscriber against `event`, returning how many ran
    ///
    /// Cancellation is re-checked before each subscriber, so a subscriber that
    /// cancels the event stops delivery to later subscribers that do not
    /// accept cancelled events.
    pub fn dispatch(&self, event: &mut E) -> usize {
        let subscribers = self.subscribers();
        let mut invoked = 0;

        for subscription in subscribers.iter() {
            if subscription.should_receive(event) {
                subscription.subscriber().handle(event);
                invoked += 1;
            }
        }

        trace!(
            key = %self.key,
            subscribers = subscribers.len(),
            invoked,
            cancelled = event.cancelled(),
            "Dispatched event"
        );
        invoked
    }
}

impl<E: Event> Keyed for EventRegistration<E> {
    fn key(&self) -> &Key {
        &self.key
    }
}

impl<E: Event> fmt::Debug for EventRegistration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistration")
            .field("key", &self.key)
            .field("type", &self.event_type())
            .field("subscribers", &self.subscribers())
            .finish()
    }
}

/// Type-erased view of a registration, used by the registration table and
/// for introspection
pub trait ErasedRegistration: Send + Sync {
    fn key(&self) -> &Key;

    fn event_type(&self) -> &'static str;

    fn event_type_id(&self) -> TypeId;

    fn subscriber_count(&self) -> usize;

    fn snapshot(&self) -> RegistrationSnapshot;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<E: Event> ErasedRegistration for EventRegistration<E> {
    fn key(&self) -> &Key {
        &self.key
    }

    fn event_type(&self) -> &'static str {
        type_name::<E>()
    }

    fn event_type_id(&self) -> TypeId {
        TypeId::of::<E>()
    }

    fn subscriber_count(&self) -> usize {
        self.len()
    }

    fn snapshot(&self) -> RegistrationSnapshot {
        RegistrationSnapshot {
            key: self.key.clone(),
            event_type: type_name::<E>().to_string(),
            subscribers: self
                .subscribers()
                .iter()
                .map(|subscription| SubscriptionSnapshot {
                    id: subscription.id(),
                    priority: subscription.priority(),
                    accepts_cancelled: subscription.accepts_cancelled(),
                })
                .collect(),
        }
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Recover the typed registration behind an erased one
pub fn downcast<E: Event>(erased: Arc<dyn ErasedRegistration>) -> Option<Arc<EventRegistration<E>>> {
    erased.into_any().downcast::<EventRegistration<E>>().ok()
}
