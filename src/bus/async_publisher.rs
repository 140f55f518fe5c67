//! # Async Publishing
//!
//! Dispatch is synchronous, so publishing from async code runs the
//! subscribers on tokio's blocking pool. The event is moved into the blocking
//! task and handed back once every subscriber has run.

use std::any::Any;
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinError;
use tracing::{debug, error};

use super::{EventBus, SimpleEventBus};
use crate::error::{EventBusError, Result};
use crate::events::{CancellableEvent, Event};

pub struct AsyncPublisher<B: EventBus + 'static> {
    bus: Arc<B>,
}

impl<B: EventBus + 'static> AsyncPublisher<B> {
    pub fn new(bus: Arc<B>) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &Arc<B> {
        &self.bus
    }

    /// Publish `event` off the async executor and return it after dispatch
    ///
    /// A panicking subscriber surfaces as [`EventBusError::Dispatch`].
    pub async fn publish<E: Event>(&self, event: E) -> Result<E> {
        let bus = Arc::clone(&self.bus);
        let mut event = event;

        tokio::task::spawn_blocking(move || {
            bus.publish(&mut event)?;
            Ok(event)
        })
        .await
        .map_err(|join_error| dispatch_failure::<E>(join_error))?
    }

    /// Publish a cancellable event, returning it with `true` if it was **not** cancelled
    pub async fn publish_cancellable<E: CancellableEvent>(&self, event: E) -> Result<(E, bool)> {
        let event = self.publish(event).await?;
        let delivered = !event.cancelled();
        Ok((event, delivered))
    }

    /// Publish several events concurrently
    ///
    /// Events are returned in input order. Fails with the first error in that
    /// order; the other events are still dispatched.
    pub async fn publish_all<E: Event>(&self, events: Vec<E>) -> Result<Vec<E>> {
        let count = events.len();
        let results = join_all(events.into_iter().map(|event| self.publish(event))).await;
        debug!(
            event_type = std::any::type_name::<E>(),
            count, "Published event batch"
        );
        results.into_iter().collect()
    }
}

impl AsyncPublisher<SimpleEventBus> {
    /// Publisher for the global bus
    pub fn global() -> Self {
        Self::new(Arc::clone(SimpleEventBus::global()))
    }
}

// Manual Clone: `B` itself does not need to be Clone
impl<B: EventBus + 'static> Clone for AsyncPublisher<B> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
        }
    }
}

impl<B: EventBus + 'static> std::fmt::Debug for AsyncPublisher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncPublisher")
            .field("bus", &self.bus.name())
            .finish()
    }
}

fn dispatch_failure<E: Event>(join_error: JoinError) -> EventBusError {
    let reason = if join_error.is_panic() {
        panic_message(join_error.into_panic())
    } else {
        join_error.to_string()
    };

    error!(
        event_type = std::any::type_name::<E>(),
        reason = %reason,
        "Event dispatch failed"
    );
    EventBusError::Dispatch(format!(
        "{} subscriber failed: {reason}",
        std::any::type_name::<E>()
    ))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "subscriber panicked".to_string()
    }
}
