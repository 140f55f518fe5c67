#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Event Bus
//!
//! Typed, prioritized, cancellable publish/subscribe for in-process events.
//!
//! ## Overview
//!
//! Every event type declares a [`Key`] of the form `namespace:value`. A bus
//! keeps one registration per event type, holding that type's subscribers
//! sorted by priority. Publishing runs the subscribers synchronously, each
//! with mutable access to the event, so earlier subscribers can modify or
//! cancel the event before later ones see it.
//!
//! ## Key Features
//!
//! - **Typed subscribers**: closures over `&mut E`, no downcasting at the call site
//! - **Priorities**: lower priorities run first, ties keep subscription order
//! - **Cancellation**: checked before every subscriber, opt-in delivery of cancelled events
//! - **Thread safety**: lock-free dispatch over copy-on-write subscriber snapshots
//! - **Global bus**: a process-wide [`SimpleEventBus`] behind [`Event::publish`]
//! - **Async publishing**: [`AsyncPublisher`] runs dispatch on tokio's blocking pool
//!
//! ## Module Organization
//!
//! - [`key`] - Event keys and their validation
//! - [`events`] - Event traits and the key cache
//! - [`bus`] - The [`EventBus`] trait, registrations and the default bus
//! - [`config`] - Bus defaults and file/environment configuration loading
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use event_bus::{CancellableEvent, Event, EventBus, EventBusConfig, SimpleEventBus};
//!
//! #[derive(Default)]
//! struct Greeting {
//!     text: String,
//!     cancelled: bool,
//! }
//!
//! impl Event for Greeting {
//!     const NAMESPACE: &'static str = "demo";
//!     const VALUE: &'static str = "greeting";
//!
//!     fn cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//! }
//!
//! impl CancellableEvent for Greeting {
//!     fn set_cancelled(&mut self, cancelled: bool) {
//!         self.cancelled = cancelled;
//!     }
//! }
//!
//! # fn main() -> event_bus::Result<()> {
//! let bus = SimpleEventBus::new(EventBusConfig::default());
//! bus.subscribe(|greeting: &mut Greeting| greeting.text.push_str(", world"))?;
//!
//! let mut greeting = Greeting { text: "hello".into(), ..Default::default() };
//! bus.publish(&mut greeting)?;
//! assert_eq!(greeting.text, "hello, world");
//! assert_eq!(bus.keys()[0].to_string(), "demo:greeting");
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib                          # Unit tests
//! cargo test                                # All tests
//! cargo bench --features benchmarks         # Criterion benchmarks
//! ```

pub mod bus;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod key;
pub mod logging;
pub mod test_utils;

pub use bus::{AsyncPublisher, EventBus, SimpleEventBus, SubscriptionId};
pub use crate::config::{ConfigManager, EventBusConfig, Settings};
pub use error::{EventBusError, Result};
pub use events::{CancellableEvent, Event};
pub use key::{InvalidKeyError, Key, Keyed};
