pub mod key_cache;
pub mod types;

// Re-export key types for convenience
pub use key_cache::{cached_key_count, clear_key_cache, declared_key, key_for, resolve_key};
pub use types::{CancellableEvent, Event};
