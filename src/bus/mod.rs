//! # Event Bus
//!
//! Synchronous, thread-safe publish/subscribe keyed by event type.
//!
//! ## Dispatch Rules
//!
//! - Subscribers run on the publishing thread, in ascending priority order.
//!   Subscribers with equal priority run in the order they subscribed.
//! - Each subscriber gets `&mut` access to the event and can change it for
//!   the subscribers that follow.
//! - Before each subscriber the event's cancellation state is checked. A
//!   cancelled event is only delivered to subscriptions that accept
//!   cancelled events.
//! - Publishing, subscribing or unsubscribing an event type the bus has not
//!   seen yet creates its registration.
//!
//! ## Usage
//!
//! ```rust
//! use event_bus::bus::{EventBus, SimpleEventBus};
//! use event_bus::config::EventBusConfig;
//! use event_bus::events::{CancellableEvent, Event};
//!
//! #[derive(Default)]
//! struct Transfer {
//!     amount: u64,
//!     cancelled: bool,
//! }
//!
//! impl Event for Transfer {
//!     const NAMESPACE: &'static str = "bank";
//!     const VALUE: &'static str = "transfer";
//!
//!     fn cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//! }
//!
//! impl CancellableEvent for Transfer {
//!     fn set_cancelled(&mut self, cancelled: bool) {
//!         self.cancelled = cancelled;
//!     }
//! }
//!
//! # fn main() -> event_bus::Result<()> {
//! let bus = SimpleEventBus::new(EventBusConfig::default());
//!
//! // Runs first: block large transfers
//! bus.subscribe_with_priority(
//!     |transfer: &mut Transfer| {
//!         if transfer.amount > 1_000 {
//!             transfer.set_cancelled(true);
//!         }
//!     },
//!     -10,
//! )?;
//!
//! // Skipped for cancelled transfers
//! bus.subscribe(|transfer: &mut Transfer| transfer.amount -= 1)?;
//!
//! let mut small = Transfer { amount: 10, ..Default::default() };
//! assert!(bus.publish_cancellable(&mut small)?);
//! assert_eq!(small.amount, 9);
//!
//! let mut large = Transfer { amount: 5_000, ..Default::default() };
//! assert!(!bus.publish_cancellable(&mut large)?);
//! assert_eq!(large.amount, 5_000);
//! # Ok(())
//! # }
//! ```

pub mod async_publisher;
pub mod registration;
pub mod registry;
pub mod simple;
pub mod snapshot;
pub mod subscription;

use std::sync::Arc;

use crate::config::EventBusConfig;
use crate::error::Result;
use crate::events::{CancellableEvent, Event};
use crate::key::Key;

pub use async_publisher::AsyncPublisher;
pub use registration::{ErasedRegistration, EventRegistration};
pub use registry::RegistrationTable;
pub use simple::SimpleEventBus;
pub use snapshot::{BusSnapshot, RegistrationSnapshot, SubscriptionSnapshot};
pub use subscription::{EventSubscriber, EventSubscription, SharedSubscriber, SubscriptionId};

/// An event bus
///
/// Implementors provide their configuration and registration table; every
/// bus operation is implemented on top of those two.
pub trait EventBus: Send + Sync {
    fn config(&self) -> &EventBusConfig;

    fn registrations(&self) -> &RegistrationTable;

    /// Name used in logs and snapshots
    fn name(&self) -> &'static str {
        "EventBus"
    }

    /// Registration for `E`, created on first use
    fn registration<E: Event>(&self) -> Result<Arc<EventRegistration<E>>> {
        self.registrations().get_or_create::<E>()
    }

    /// Publish an event to all subscribers of its type
    fn publish<E: Event>(&self, event: &mut E) -> Result<()> {
        self.registration::<E>()?.dispatch(event);
        Ok(())
    }

    /// Publish a cancellable event, returning `true` if it was **not** cancelled
    fn publish_cancellable<E: CancellableEvent>(&self, event: &mut E) -> Result<bool> {
        self.publish(event)?;
        Ok(!event.cancelled())
    }

    /// Subscribe a shared subscriber instance
    ///
    /// The same instance can later be removed with
    /// [`EventBus::unsubscribe_subscriber`].
    fn register<E: Event>(
        &self,
        subscriber: SharedSubscriber<E>,
        priority: i32,
        accepts_cancelled: bool,
    ) -> Result<SubscriptionId> {
        let registration = self.registration::<E>()?;
        Ok(registration.subscribe(EventSubscription::new(
            priority,
            accepts_cancelled,
            subscriber,
        )))
    }

    fn subscribe_with<E, F>(
        &self,
        handler: F,
        priority: i32,
        accepts_cancelled: bool,
    ) -> Result<SubscriptionId>
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.register::<E>(Arc::new(handler), priority, accepts_cancelled)
    }

    /// Subscribe with the bus' default cancellation behaviour
    fn subscribe_with_priority<E, F>(&self, handler: F, priority: i32) -> Result<SubscriptionId>
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let accepts_cancelled = self.config().accepts_cancelled();
        self.subscribe_with::<E, F>(handler, priority, accepts_cancelled)
    }

    /// Subscribe with the bus' default priority and cancellation behaviour
    fn subscribe<E, F>(&self, handler: F) -> Result<SubscriptionId>
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let config = *self.config();
        self.subscribe_with::<E, F>(handler, config.priority(), config.accepts_cancelled())
    }

    /// Remove a subscription, returning whether it existed
    fn unsubscribe<E: Event>(&self, id: SubscriptionId) -> Result<bool> {
        Ok(self.registration::<E>()?.unsubscribe(id))
    }

    /// Remove every subscription of this subscriber instance
    fn unsubscribe_subscriber<E: Event>(&self, subscriber: &SharedSubscriber<E>) -> Result<usize> {
        Ok(self.registration::<E>()?.unsubscribe_subscriber(subscriber))
    }

    /// Registration for `E` without creating it
    fn get<E: Event>(&self) -> Option<Arc<EventRegistration<E>>> {
        self.registrations().get::<E>()
    }

    /// Registration under `key`, if it exists and belongs to `E`
    fn get_by_key<E: Event>(&self, key: &Key) -> Option<Arc<EventRegistration<E>>> {
        self.registrations().get_by_key::<E>(key)
    }

    /// Keys of all registered event types, sorted
    fn keys(&self) -> Vec<Key> {
        self.registrations().keys()
    }

    fn snapshot(&self) -> BusSnapshot {
        let registrations: Vec<RegistrationSnapshot> = self
            .registrations()
            .registrations()
            .iter()
            .map(|registration| registration.snapshot())
            .collect();

        BusSnapshot {
            name: self.name().to_string(),
            config: *self.config(),
            events: registrations.len(),
            registrations,
        }
    }
}
