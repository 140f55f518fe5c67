//! # Event Bus Configuration
//!
//! [`EventBusConfig`] holds the defaults a bus applies to subscriptions that
//! do not specify their own priority or cancellation behaviour. [`Settings`]
//! is the loadable application configuration, see [`ConfigManager`].
//!
//! ## Usage
//!
//! ```rust
//! use event_bus::config::EventBusConfig;
//!
//! let config = EventBusConfig::builder()
//!     .priority(10)
//!     .accepts_cancelled(true)
//!     .build();
//!
//! assert_eq!(config.priority(), 10);
//! assert!(config.accepts_cancelled());
//!
//! // Derive a variant from an existing config
//! let quieter = config.to_builder().priority(-5).build();
//! assert_eq!(quieter.priority(), -5);
//! assert!(quieter.accepts_cancelled());
//! ```

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::constants::defaults::{DEFAULT_ACCEPTS_CANCELLED, DEFAULT_PRIORITY};
use crate::constants::system::VALID_LOG_LEVELS;
use crate::error::{EventBusError, Result};

pub use loader::ConfigManager;

/// Subscription defaults of an event bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Priority given to subscriptions registered without one
    priority: i32,
    /// Whether subscriptions registered without the option receive cancelled events
    accepts_cancelled: bool,
}

impl EventBusConfig {
    pub fn builder() -> EventBusConfigBuilder {
        EventBusConfigBuilder::default()
    }

    pub fn to_builder(&self) -> EventBusConfigBuilder {
        EventBusConfigBuilder {
            priority: self.priority,
            accepts_cancelled: self.accepts_cancelled,
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn accepts_cancelled(&self) -> bool {
        self.accepts_cancelled
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            accepts_cancelled: DEFAULT_ACCEPTS_CANCELLED,
        }
    }
}

/// Builder for [`EventBusConfig`]
#[derive(Debug, Clone)]
pub struct EventBusConfigBuilder {
    priority: i32,
    accepts_cancelled: bool,
}

impl Default for EventBusConfigBuilder {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            accepts_cancelled: DEFAULT_ACCEPTS_CANCELLED,
        }
    }
}

impl EventBusConfigBuilder {
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn accepts_cancelled(mut self, accepts_cancelled: bool) -> Self {
        self.accepts_cancelled = accepts_cancelled;
        self
    }

    pub fn build(self) -> EventBusConfig {
        EventBusConfig {
            priority: self.priority,
            accepts_cancelled: self.accepts_cancelled,
        }
    }
}

/// Logging options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Overrides the environment-derived level
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Root configuration loaded from file and environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bus: EventBusConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.logging.level {
            if !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(EventBusError::Validation(format!(
                    "logging.level '{level}' is not one of {VALID_LOG_LEVELS:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EventBusConfig::default();
        assert_eq!(config.priority(), 0);
        assert!(!config.accepts_cancelled());
        assert_eq!(EventBusConfig::builder().build(), config);
    }

    #[test]
    fn test_to_builder_round_trips() {
        let config = EventBusConfig::builder()
            .priority(7)
            .accepts_cancelled(true)
            .build();
        assert_eq!(config.to_builder().build(), config);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.logging.level = Some("INFO".to_string());
        assert!(settings.validate().is_ok());

        settings.logging.level = Some("verbose".to_string());
        assert!(matches!(
            settings.validate(),
            Err(EventBusError::Validation(_))
        ));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"bus": {"accepts_cancelled": true}}"#).unwrap();
        assert_eq!(settings.bus.priority(), 0);
        assert!(settings.bus.accepts_cancelled());
        assert!(!settings.logging.json);
    }
}
