//! Event traits implemented by user event types.

use crate::bus::{EventBus, SimpleEventBus};
use crate::error::Result;
use crate::key::Key;

use super::key_cache::key_for;

/// An event that can be published on an [`EventBus`]
///
/// The key of an event type is declared through [`Event::NAMESPACE`] and
/// [`Event::VALUE`]. Both halves must form a valid [`Key`], otherwise the
/// type cannot be subscribed to or published.
///
/// ```rust
/// use event_bus::events::Event;
///
/// struct UserJoined {
///     name: String,
/// }
///
/// impl Event for UserJoined {
///     const NAMESPACE: &'static str = "chat";
///     const VALUE: &'static str = "user_joined";
///
///     fn cancelled(&self) -> bool {
///         false
///     }
/// }
/// ```
pub trait Event: Send + 'static {
    const NAMESPACE: &'static str;
    const VALUE: &'static str;

    /// Cancellation state checked before each subscriber runs
    ///
    /// Required so that a [`CancellableEvent`] cannot silently keep reporting
    /// `false`. Events that cannot be cancelled return `false`.
    fn cancelled(&self) -> bool;

    /// Resolved key of this event's type
    fn key(&self) -> Result<Key>
    where
        Self: Sized,
    {
        key_for::<Self>()
    }

    /// Publish on the global bus
    fn publish(&mut self) -> Result<()>
    where
        Self: Sized,
    {
        SimpleEventBus::global().publish(self)
    }
}

/// An event that subscribers can cancel
///
/// ```rust
/// use event_bus::events::{CancellableEvent, Event};
///
/// #[derive(Default)]
/// struct ChatMessage {
///     text: String,
///     cancelled: bool,
/// }
///
/// impl Event for ChatMessage {
///     const NAMESPACE: &'static str = "chat";
///     const VALUE: &'static str = "message";
///
///     fn cancelled(&self) -> bool {
///         self.cancelled
///     }
/// }
///
/// impl CancellableEvent for ChatMessage {
///     fn set_cancelled(&mut self, cancelled: bool) {
///         self.cancelled = cancelled;
///     }
/// }
/// ```
///
/// The cancellation state must be reported through [`Event::cancelled`].
/// Storing the flag without reading it back does not compile:
///
/// ```compile_fail
/// use event_bus::events::{CancellableEvent, Event};
///
/// struct Forgetful {
///     cancelled: bool,
/// }
///
/// impl Event for Forgetful {
///     const NAMESPACE: &'static str = "chat";
///     const VALUE: &'static str = "forgetful";
/// }
///
/// impl CancellableEvent for Forgetful {
///     fn set_cancelled(&mut self, cancelled: bool) {
///         self.cancelled = cancelled;
///     }
/// }
/// ```
pub trait CancellableEvent: Event {
    fn set_cancelled(&mut self, cancelled: bool);

    /// Publish on the global bus, returning `true` if the event was **not** cancelled
    fn publish_and_return(&mut self) -> Result<bool>
    where
        Self: Sized,
    {
        SimpleEventBus::global().publish_cancellable(self)
    }
}
