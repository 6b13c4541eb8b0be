//! Key-Value Storage
//!
//! String key-value persistence behind a trait so browser storage can be
//! swapped for an in-memory map.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{describe_js, UiError, UiResult};

/// Minimal string store (localStorage semantics: last writer wins)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> UiResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> UiResult<()>;
    fn remove(&self, key: &str) -> UiResult<()>;
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Fails when storage is disabled (privacy mode, sandboxed frames)
    pub fn open(window: &web_sys::Window) -> UiResult<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(UiError::Storage("localStorage unavailable".into())),
            Err(e) => Err(UiError::Storage(describe_js(&e))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> UiResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| UiError::Storage(describe_js(&e)))
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| UiError::Storage(describe_js(&e)))
    }

    fn remove(&self, key: &str) -> UiResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| UiError::Storage(describe_js(&e)))
    }
}

/// Process-local store; used when localStorage is unavailable and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> UiResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> UiResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_last_writer_wins() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        store.remove("nothing").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get("nothing").unwrap(), None);
    }
}
