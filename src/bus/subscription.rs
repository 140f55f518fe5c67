//! Subscribers and prioritized subscriptions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::Event;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one subscription, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handles published events of type `E`
///
/// Implemented for every `Fn(&mut E) + Send + Sync + 'static`, so closures can
/// be used directly.
pub trait EventSubscriber<E: Event>: Send + Sync + 'static {
    fn handle(&self, event: &mut E);
}

impl<E, F> EventSubscriber<E> for F
where
    E: Event,
    F: Fn(&mut E) + Send + Sync + 'static,
{
    fn handle(&self, event: &mut E) {
        self(event)
    }
}

/// A subscriber instance that can be shared and later unsubscribed by identity
pub type SharedSubscriber<E> = Arc<dyn EventSubscriber<E>>;

/// A subscriber plus the options it was registered with
pub struct EventSubscription<E: Event> {
    id: SubscriptionId,
    priority: i32,
    accepts_cancelled: bool,
    subscriber: SharedSubscriber<E>,
}

impl<E: Event> EventSubscription<E> {
    pub fn new(priority: i32, accepts_cancelled: bool, subscriber: SharedSubscriber<E>) -> Self {
        Self {
            id: SubscriptionId::next(),
            priority,
            accepts_cancelled,
            subscriber,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Lower priorities run first
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn accepts_cancelled(&self) -> bool {
        self.accepts_cancelled
    }

    pub fn subscriber(&self) -> &SharedSubscriber<E> {
        &self.subscriber
    }

    /// Whether this subscription wraps exactly the given subscriber instance
    pub fn is_subscriber(&self, subscriber: &SharedSubscriber<E>) -> bool {
        // Compare data pointers only, vtable pointers are not unique
        std::ptr::eq(
            Arc::as_ptr(&self.subscriber) as *const (),
            Arc::as_ptr(subscriber) as *const (),
        )
    }

    /// Whether this subscription should see `event` in its current state
    pub fn should_receive(&self, event: &E) -> bool {
        !event.cancelled() || self.accepts_cancelled
    }
}

// Manual impls: deriving would require `E: Clone` / `E: Debug`
impl<E: Event> Clone for EventSubscription<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            priority: self.priority,
            accepts_cancelled: self.accepts_cancelled,
            subscriber: Arc::clone(&self.subscriber),
        }
    }
}

impl<E: Event> fmt::Debug for EventSubscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("accepts_cancelled", &self.accepts_cancelled)
            .field("subscriber", &"<Arc<dyn EventSubscriber>>")
            .finish()
    }
}
