use crate::key::InvalidKeyError;

#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] InvalidKeyError),

    #[error("Event {event_type} is not annotated with a valid key")]
    UnkeyedEvent { event_type: &'static str },

    #[error("Key '{key}' is already registered for {registered}, cannot register it for {requested}")]
    KeyConflict {
        key: String,
        registered: &'static str,
        requested: &'static str,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, EventBusError>;
