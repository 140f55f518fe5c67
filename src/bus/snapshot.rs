//! Serializable point-in-time views of a bus, for debugging and diagnostics.

use serde::{Deserialize, Serialize};

use super::subscription::SubscriptionId;
use crate::config::EventBusConfig;
use crate::key::Key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusSnapshot {
    pub name: String,
    pub config: EventBusConfig,
    /// Number of registered event types
    pub events: usize,
    /// Sorted by key
    pub registrations: Vec<RegistrationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSnapshot {
    pub key: Key,
    pub event_type: String,
    /// In dispatch order
    pub subscribers: Vec<SubscriptionSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub id: SubscriptionId,
    pub priority: i32,
    pub accepts_cancelled: bool,
}

impl BusSnapshot {
    pub fn total_subscribers(&self) -> usize {
        self.registrations
            .iter()
            .map(|registration| registration.subscribers.len())
            .sum()
    }

    pub fn registration(&self, key: &Key) -> Option<&RegistrationSnapshot> {
        self.registrations
            .iter()
            .find(|registration| &registration.key == key)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
