//! # Namespaced Keys
//!
//! Every event type is identified by a [`Key`] of the form `namespace:value`.
//! Keys are validated on construction, so a `Key` value is always well formed.
//!
//! ```rust
//! use event_bus::key::Key;
//!
//! let key = Key::parse("payments:charged").unwrap();
//! assert_eq!(key.namespace(), "payments");
//! assert_eq!(key.value(), "charged");
//! assert_eq!(key.to_string(), "payments:charged");
//!
//! // No namespace falls back to the default one
//! assert_eq!(Key::parse("ping").unwrap().to_string(), "event:ping");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::keys::{DEFAULT_NAMESPACE, SEPARATOR};

/// A validated `namespace:value` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    namespace: String,
    value: String,
}

/// Something identified by a [`Key`]
pub trait Keyed {
    fn key(&self) -> &Key;
}

/// Which half of a key failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    Namespace,
    Value,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Namespace => write!(f, "namespace"),
            KeyPart::Value => write!(f, "value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidKeyError {
    #[error("{part} must not be empty")]
    Empty { part: KeyPart },

    #[error("{part} '{text}' contains illegal character '{character}'")]
    IllegalCharacter {
        part: KeyPart,
        text: String,
        character: char,
    },
}

impl Key {
    /// Create a key from its two halves
    pub fn new(
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidKeyError> {
        let namespace = namespace.into();
        let value = value.into();
        validate(KeyPart::Namespace, &namespace, is_namespace_char)?;
        validate(KeyPart::Value, &value, is_value_char)?;
        Ok(Self { namespace, value })
    }

    /// Parse `namespace:value`, or `value` alone under [`DEFAULT_NAMESPACE`]
    pub fn parse(input: &str) -> Result<Self, InvalidKeyError> {
        match input.split_once(SEPARATOR) {
            Some((namespace, value)) => Self::new(namespace, value),
            None => Self::new(DEFAULT_NAMESPACE, input),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

fn validate(part: KeyPart, text: &str, allowed: fn(char) -> bool) -> Result<(), InvalidKeyError> {
    if text.is_empty() {
        return Err(InvalidKeyError::Empty { part });
    }
    match text.chars().find(|c| !allowed(*c)) {
        Some(character) => Err(InvalidKeyError::IllegalCharacter {
            part,
            text: text.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// `[a-z0-9_.-]`
pub fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

/// `[a-z0-9_.-/]`
pub fn is_value_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.value)
    }
}

impl FromStr for Key {
    type Err = InvalidKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Key {
    type Error = InvalidKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl Keyed for Key {
    fn key(&self) -> &Key {
        self
    }
}
