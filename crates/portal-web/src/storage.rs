//! Web storage implementations of the engine's store seam
//!
//! Storage access can be refused outright (private browsing, sandboxed
//! frames). Both stores degrade to doing nothing in that case, leaving the
//! engine with in-memory behavior for the session.

use portal_core::StateStore;
use web_sys::Storage;

/// Tab-scoped store holding the login flag
pub struct SessionStorageStore {
    storage: Option<Storage>,
}

impl SessionStorageStore {
    pub fn new() -> Self {
        Self {
            storage: web_sys::window().and_then(|w| w.session_storage().ok().flatten()),
        }
    }
}

impl Default for SessionStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for SessionStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

/// Durable per-origin store holding rate-limit stamps
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self {
            storage: web_sys::window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
