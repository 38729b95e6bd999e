//! Key/value storage contracts and the persisted reactive value core.

pub mod error;
pub mod persisted;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

pub use error::{StorageError, StorageErrorKind};
pub use persisted::{ErrorCallback, Initial, PersistedValue, Update};

/// Host facility mapping string keys to string values (JSON text per key).
///
/// Implementations are synchronous: browser `localStorage`/`sessionStorage` and the in-memory
/// store all complete within the calling callback.
pub trait KeyValueStore {
    /// Reads the raw text stored at `key`, or `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] when the backend refuses the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the raw text stored at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when the backend rejects the write (quota, security).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory key/value store. Clones share the same slots.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns the raw text at `key` without going through the [`KeyValueStore`] contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Removes a slot.
    pub fn remove(&self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_slots() {
        let store = MemoryKeyValueStore::default();
        let other = store.clone();

        store.set_item("theme", "\"dark\"").expect("set");
        assert_eq!(
            other.get_item("theme").expect("get"),
            Some("\"dark\"".to_string())
        );

        other.remove("theme");
        assert!(store.is_empty());
        assert_eq!(store.get_item("theme").expect("get"), None);
    }

    #[test]
    fn dyn_store_through_rc_delegates() {
        let memory = MemoryKeyValueStore::default();
        let store: Rc<dyn KeyValueStore> = Rc::new(memory.clone());

        store.set_item("k", "1").expect("set");
        assert_eq!(memory.raw("k").as_deref(), Some("1"));
        assert_eq!(store.get_item("k").expect("get").as_deref(), Some("1"));
        assert_eq!(memory.len(), 1);
    }
}
