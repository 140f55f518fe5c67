//! # System Constants
//!
//! Defaults and environment variable names shared across the event bus.

/// Subscription defaults applied when a subscriber does not specify them
pub mod defaults {
    pub const DEFAULT_PRIORITY: i32 = 0;
    pub const DEFAULT_ACCEPTS_CANCELLED: bool = false;
}

/// Key parsing and validation
pub mod keys {
    /// Namespace used by [`crate::key::Key::parse`] when the input has no `:`
    pub const DEFAULT_NAMESPACE: &str = "event";
    pub const SEPARATOR: char = ':';
}

/// Environment variables read by configuration and logging
pub mod env {
    pub const ENVIRONMENT: &str = "EVENT_BUS_ENV";
    pub const ENVIRONMENT_FALLBACK: &str = "APP_ENV";
    pub const CONFIG_PATH: &str = "EVENT_BUS_CONFIG";
    pub const PREFIX: &str = "EVENT_BUS";
    pub const NESTING_SEPARATOR: &str = "__";
}

pub mod system {
    pub const EVENT_BUS_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Config file read when no explicit path is given
    pub const DEFAULT_CONFIG_FILE: &str = "config/event_bus.yaml";

    pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
}
