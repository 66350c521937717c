//! Client-side storage boundary
//!
//! Two stores back the portal: a tab-scoped one holding only the login
//! flag, and a durable per-origin one holding only rate-limit stamps.
//! Implementations swallow host write failures; the portal degrades
//! rather than erroring when storage is unavailable.

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Key-value storage seam backed by the host environment
pub trait StateStore {
    /// Read a value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, silently dropped on host failure
    fn set(&self, key: &str, value: &str);

    /// Remove a value if present
    fn remove(&self, key: &str);
}

/// In-memory store for tests and headless use
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}
