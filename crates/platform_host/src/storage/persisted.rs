//! A value mirrored between memory and one slot of a [`KeyValueStore`].
//!
//! [`PersistedValue`] is framework-free: it owns the latest in-memory value and pushes every
//! update through to the store as JSON text. Reactive bindings wrap it and mirror
//! [`PersistedValue::get`] into a signal after each update.

use std::{fmt, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

use super::{KeyValueStore, StorageError};

/// Sink for recoverable storage failures.
pub type ErrorCallback = Rc<dyn Fn(&StorageError)>;

/// Initial value used when the slot holds nothing usable.
pub enum Initial<T> {
    /// Ready value.
    Value(T),
    /// Producer evaluated only when the initial value is actually needed.
    Lazy(Box<dyn FnOnce() -> T>),
}

impl<T> Initial<T> {
    /// Wraps a ready value.
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    /// Wraps a producer that runs at most once, on demand.
    pub fn lazy(producer: impl FnOnce() -> T + 'static) -> Self {
        Self::Lazy(Box::new(producer))
    }

    /// Returns the value, running the producer if needed.
    pub fn resolve(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Lazy(producer) => producer(),
        }
    }
}

impl<T> From<T> for Initial<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Default + 'static> Default for Initial<T> {
    fn default() -> Self {
        Self::Lazy(Box::new(T::default))
    }
}

impl<T: fmt::Debug> fmt::Debug for Initial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// New value for a [`PersistedValue`]: either a replacement or a function of the previous value.
pub enum Update<T> {
    /// Replace the value outright.
    Replace(T),
    /// Derive the value from the latest in-memory value.
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    /// Wraps an updater function.
    pub fn with(updater: impl FnOnce(&T) -> T + 'static) -> Self {
        Self::With(Box::new(updater))
    }

    fn apply_to(self, previous: &T) -> T {
        match self {
            Self::Replace(value) => value,
            Self::With(updater) => updater(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Replace(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// In-memory value bound to the slot `key` of an optional store.
///
/// Without a store the value is memory-only (degraded mode): nothing is read, nothing is written
/// and no error is ever reported.
pub struct PersistedValue<T, S> {
    key: String,
    store: Option<S>,
    value: T,
    on_error: Option<ErrorCallback>,
}

impl<T, S> PersistedValue<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Reads the slot once and returns the bound value.
    ///
    /// Falls back to `initial` when the slot is empty, unreadable or holds text that does not
    /// parse into `T`; the latter two are reported through `on_error`. `initial` is resolved
    /// only on fallback.
    pub fn get_or_create(
        store: Option<S>,
        key: impl Into<String>,
        initial: Initial<T>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        let key = key.into();
        let persisted = match store.as_ref().map(|store| read_slot(store, &key)) {
            Some(Ok(value)) => value,
            Some(Err(err)) => {
                if let Some(callback) = &on_error {
                    callback(&err);
                }
                None
            }
            None => None,
        };
        let value = persisted.unwrap_or_else(|| initial.resolve());

        Self {
            key,
            store,
            value,
            on_error,
        }
    }

    /// Creates a memory-only value; the store is never touched.
    pub fn in_memory(key: impl Into<String>, initial: Initial<T>) -> Self {
        Self::get_or_create(None, key, initial, None)
    }

    /// Latest in-memory value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Slot this value is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `false` in degraded (memory-only) mode.
    pub fn is_persisted(&self) -> bool {
        self.store.is_some()
    }

    /// Replaces the value and persists it.
    pub fn set(&mut self, value: T) -> &T {
        self.apply(Update::Replace(value))
    }

    /// Derives the value from the latest one and persists it.
    pub fn update(&mut self, updater: impl FnOnce(&T) -> T + 'static) -> &T {
        self.apply(Update::with(updater))
    }

    /// Applies `update` and persists the result, reporting failures through the error callback.
    pub fn apply(&mut self, update: Update<T>) -> &T {
        if let Err(err) = self.try_apply(update) {
            self.report(&err);
        }
        &self.value
    }

    /// Applies `update` and persists the result.
    ///
    /// The in-memory value is updated even when persisting fails. Callers that hold a borrow of
    /// this value while reporting should use this and run [`PersistedValue::report`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialize`] or the store's write error.
    pub fn try_apply(&mut self, update: Update<T>) -> Result<(), StorageError> {
        self.value = update.apply_to(&self.value);
        self.persist()
    }

    /// Forwards `err` to the error callback, if one was supplied.
    pub fn report(&self, err: &StorageError) {
        if let Some(callback) = &self.on_error {
            callback(err);
        }
    }

    /// Error callback supplied at creation.
    pub fn error_callback(&self) -> Option<ErrorCallback> {
        self.on_error.clone()
    }

    /// Consumes the binding and returns the in-memory value.
    pub fn into_inner(self) -> T {
        self.value
    }

    fn persist(&self) -> Result<(), StorageError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let raw =
            serde_json::to_string(&self.value).map_err(|e| StorageError::serialize(&self.key, e))?;
        store.set_item(&self.key, &raw)
    }
}

impl<T: fmt::Debug, S> fmt::Debug for PersistedValue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("persisted", &self.store.is_some())
            .finish()
    }
}

/// Reads and parses the slot at `key`.
///
/// # Errors
///
/// Returns the store's read error, or [`StorageError::Parse`] when the text does not parse.
pub fn read_slot<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::parse(key, e))
}
