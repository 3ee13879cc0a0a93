//! In-memory preference store.
//!
//! Serves targets without a native preferences binding and keeps the bridge
//! drivable in tests without a host.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::bindings::PreferenceStore;

/// A [PreferenceStore] holding entries in process memory. Clones share the
/// same namespace, so a test can keep a handle on the store it hands to the
/// builder.
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: String) -> Option<String> {
        self.entries.lock().unwrap().get(&key).cloned()
    }

    // None clears the entry, the SharedPreferences treatment of null.
    fn set(&self, key: String, value: Option<String>) {
        let mut entries = self.entries.lock().unwrap();
        match value {
            Some(value) => {
                entries.insert(key, value);
            }
            None => {
                entries.remove(&key);
            }
        }
    }

    fn remove(&self, key: String) {
        self.entries.lock().unwrap().remove(&key);
    }

    fn contains(&self, key: String) -> bool {
        self.entries.lock().unwrap().contains_key(&key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}
