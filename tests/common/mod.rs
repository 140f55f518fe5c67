#![allow(dead_code)]

pub mod strategies;

use event_bus::{CancellableEvent, Event};

pub const NAMESPACE: &str = "nayrid";

/// Cancellable event carrying a counter
#[derive(Debug, Clone, Default)]
pub struct IntegerEvent {
    integer: i32,
    cancelled: bool,
}

impl IntegerEvent {
    pub fn new(integer: i32) -> Self {
        Self {
            integer,
            cancelled: false,
        }
    }

    pub fn get(&self) -> i32 {
        self.integer
    }

    pub fn increment(&mut self) {
        self.integer += 1;
    }
}

impl Event for IntegerEvent {
    const NAMESPACE: &'static str = NAMESPACE;
    const VALUE: &'static str = "integer";

    fn cancelled(&self) -> bool {
        self.cancelled
    }
}

impl CancellableEvent for IntegerEvent {
    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Records the labels of the subscribers it passed through
#[derive(Debug, Clone, Default)]
pub struct TraceEvent {
    pub seen: Vec<String>,
    pub cancelled: bool,
}

impl Event for TraceEvent {
    const NAMESPACE: &'static str = NAMESPACE;
    const VALUE: &'static str = "trace";

    fn cancelled(&self) -> bool {
        self.cancelled
    }
}

impl CancellableEvent for TraceEvent {
    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Non-cancellable event used for concurrency tests
#[derive(Debug, Default)]
pub struct CountingEvent {
    pub hits: u32,
}

impl Event for CountingEvent {
    const NAMESPACE: &'static str = NAMESPACE;
    const VALUE: &'static str = "counting";

    fn cancelled(&self) -> bool {
        false
    }
}
