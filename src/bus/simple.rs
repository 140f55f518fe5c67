use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::info;

use super::registry::RegistrationTable;
use super::EventBus;
use crate::config::EventBusConfig;
use crate::constants::system::EVENT_BUS_VERSION;

static GLOBAL_BUS: OnceLock<Arc<SimpleEventBus>> = OnceLock::new();

/// The default [`EventBus`] implementation
pub struct SimpleEventBus {
    config: EventBusConfig,
    registrations: RegistrationTable,
}

impl SimpleEventBus {
    pub fn new(config: EventBusConfig) -> Self {
        info!(
            version = EVENT_BUS_VERSION,
            priority = config.priority(),
            accepts_cancelled = config.accepts_cancelled(),
            "Creating SimpleEventBus"
        );

        Self {
            config,
            registrations: RegistrationTable::new(),
        }
    }

    /// The process-wide bus, created with the default config on first use
    pub fn global() -> &'static Arc<SimpleEventBus> {
        GLOBAL_BUS.get_or_init(|| Arc::new(SimpleEventBus::new(EventBusConfig::default())))
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new(EventBusConfig::default())
    }
}

impl EventBus for SimpleEventBus {
    fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn registrations(&self) -> &RegistrationTable {
        &self.registrations
    }

    fn name(&self) -> &'static str {
        "SimpleEventBus"
    }
}

// Manual Debug implementation because registrations contain closures
impl fmt::Debug for SimpleEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleEventBus")
            .field("config", &self.config)
            .field("events", &self.registrations.len())
            .field("registrations", &self.registrations)
            .finish()
    }
}

impl fmt::Display for SimpleEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registrations = self.registrations.registrations();
        write!(
            f,
            "{}{{events={}, registeredEvents=[",
            self.name(),
            registrations.len()
        )?;
        for (index, registration) in registrations.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{}<{}>({} subscribers)",
                registration.key(),
                registration.event_type(),
                registration.subscriber_count()
            )?;
        }
        write!(f, "]}}")
    }
}
