//! # Session Storage
//!
//! The [`SessionStore`] trait and its in-memory implementation.

use std::collections::HashMap;
use std::fmt::Debug;

/// Key of the "this tab has seen the welcome sequence" flag.
pub const VISITED_KEY: &str = "termfolio.visited";

/// A short-lived, per-tab key-value store.
///
/// Implementations outlive a single page load but not the tab itself.
pub trait SessionStore: Debug {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);

    /// Remove a value. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);

    /// Whether a value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Session store backed by a `HashMap`, living as long as the host process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store (a fresh tab).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());
        assert!(!store.contains(VISITED_KEY));
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemorySessionStore::new();
        store.set(VISITED_KEY, "true");
        assert_eq!(store.get(VISITED_KEY).as_deref(), Some("true"));
        assert!(store.contains(VISITED_KEY));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemorySessionStore::new();
        store.set("k", "1");
        store.set("k", "2");
        assert_eq!(store.get("k").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut store = MemorySessionStore::new();
        store.remove("missing");
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_clears_flag() {
        let mut store = MemorySessionStore::new();
        store.set(VISITED_KEY, "true");
        store.remove(VISITED_KEY);
        assert!(!store.contains(VISITED_KEY));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut store: Box<dyn SessionStore> = Box::new(MemorySessionStore::new());
        store.set(VISITED_KEY, "true");
        assert!(store.contains(VISITED_KEY));
    }
}
