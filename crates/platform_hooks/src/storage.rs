//! Reactive values persisted as JSON in a key/value store.

use std::rc::Rc;

use leptos::*;
use platform_host::{ErrorCallback, Initial, KeyValueStore, PersistedValue, StorageError, Update};
use serde::{de::DeserializeOwned, Serialize};

type SharedStore = Rc<dyn KeyValueStore>;

/// Write half returned by [`use_storage`].
///
/// Every call updates the in-memory value and the signal first, then makes one write attempt.
/// Failed writes are logged and forwarded to the hook's error callback; they never roll the
/// value back.
pub struct StorageSetter<T: 'static> {
    cell: StoredValue<PersistedValue<T, SharedStore>>,
    value: WriteSignal<T>,
}

impl<T: 'static> Clone for StorageSetter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for StorageSetter<T> {}

impl<T> StorageSetter<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Replaces the value.
    pub fn set(&self, value: T) {
        self.apply(Update::Replace(value));
    }

    /// Derives the value from the latest in-memory value.
    pub fn update(&self, updater: impl FnOnce(&T) -> T + 'static) {
        self.apply(Update::with(updater));
    }

    /// Applies `update`, then persists.
    pub fn apply(&self, update: Update<T>) {
        let Some((next, failure)) = self.cell.try_update_value(|cell| {
            let failure = cell
                .try_apply(update)
                .err()
                .map(|err| (err, cell.error_callback()));
            (cell.get().clone(), failure)
        }) else {
            logging::warn!("storage setter called after its owner was disposed");
            return;
        };

        self.value.set(next);
        // Reported outside the cell borrow so the callback may call the setter again.
        if let Some((err, Some(callback))) = failure {
            callback(&err);
        }
    }

    /// Returns `false` when the value lives only in memory.
    pub fn is_persisted(&self) -> bool {
        self.cell
            .try_with_value(|cell| cell.is_persisted())
            .unwrap_or(false)
    }
}

/// Binds `key` in `store` to a reactive value.
///
/// The slot is read once: a parsable value wins, otherwise `initial` is resolved. Unparsable or
/// unreadable slots are reported through `on_error` and fall back to `initial`. With `store`
/// set to `None` (the facility failed its access probe) the value lives only in memory and no
/// error is ever reported.
pub fn use_storage<T, S>(
    store: Option<S>,
    key: impl Into<String>,
    initial: Initial<T>,
    on_error: Option<Callback<StorageError>>,
) -> (Signal<T>, StorageSetter<T>)
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    S: KeyValueStore + 'static,
{
    let store = store.map(|store| Rc::new(store) as SharedStore);
    let report: ErrorCallback = Rc::new(move |err: &StorageError| {
        logging::warn!("persisted value access failed: {err}");
        if let Some(on_error) = on_error {
            on_error.call(err.clone());
        }
    });

    let cell = PersistedValue::get_or_create(store, key, initial, Some(report));
    let (value, set_value) = create_signal(cell.get().clone());
    let setter = StorageSetter {
        cell: store_value(cell),
        value: set_value,
    };
    (value.into(), setter)
}

/// Stores a value in `localStorage`, degrading to memory-only state when it is inaccessible.
///
/// `on_error` receives quota, serialization and parse failures.
pub fn use_local_storage<T>(
    key: impl Into<String>,
    initial: Initial<T>,
    on_error: Option<Callback<StorageError>>,
) -> (Signal<T>, StorageSetter<T>)
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    use_storage(platform_host_web::local_storage(), key, initial, on_error)
}

/// Stores a value in `sessionStorage`, degrading to memory-only state when it is inaccessible.
pub fn use_session_storage<T>(
    key: impl Into<String>,
    initial: Initial<T>,
    on_error: Option<Callback<StorageError>>,
) -> (Signal<T>, StorageSetter<T>)
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    use_storage(platform_host_web::session_storage(), key, initial, on_error)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use platform_host::{MemoryKeyValueStore, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Viewer {
        zoom: f32,
        pinned: Vec<String>,
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::write(key, "QuotaExceededError"))
        }
    }

    fn collect_errors() -> (Callback<StorageError>, Rc<RefCell<Vec<StorageError>>>) {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = errors.clone();
        let callback = Callback::new(move |err: StorageError| sink.borrow_mut().push(err));
        (callback, errors)
    }

    #[test]
    fn counter_increments_are_mirrored_and_persisted() {
        let _ = create_runtime();
        let store = MemoryKeyValueStore::default();

        let (count, set_count) =
            use_storage(Some(store.clone()), "count", Initial::value(0_i32), None);
        assert_eq!(count.get_untracked(), 0);

        for _ in 0..3 {
            set_count.update(|prev| prev + 1);
        }

        assert_eq!(count.get_untracked(), 3);
        assert_eq!(store.raw("count").as_deref(), Some("3"));
        assert!(set_count.is_persisted());
    }

    #[test]
    fn second_hook_reads_what_the_first_wrote() {
        let _ = create_runtime();
        let store = MemoryKeyValueStore::default();
        let viewer = Viewer {
            zoom: 1.5,
            pinned: vec!["/Documents".to_string()],
        };

        let (_, set_first) = use_storage(
            Some(store.clone()),
            "viewer",
            Initial::<Option<Viewer>>::default(),
            None,
        );
        set_first.set(Some(viewer.clone()));

        let produced = Rc::new(Cell::new(false));
        let flag = produced.clone();
        let (second, _) = use_storage(
            Some(store),
            "viewer",
            Initial::lazy(move || {
                flag.set(true);
                None::<Viewer>
            }),
            None,
        );

        assert_eq!(second.get_untracked(), Some(viewer));
        assert!(!produced.get());
    }

    #[test]
    fn corrupt_slot_reports_once_and_uses_initial() {
        let _ = create_runtime();
        let store = MemoryKeyValueStore::default();
        store.set_item("prefs", "{\"zoom\":").expect("seed");
        let (on_error, errors) = collect_errors();

        let (prefs, _) = use_storage(
            Some(store),
            "prefs",
            Initial::value(Viewer {
                zoom: 1.0,
                pinned: Vec::new(),
            }),
            Some(on_error),
        );

        assert_eq!(prefs.get_untracked().zoom, 1.0);
        let errors = errors.borrow();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), StorageErrorKind::Parse);
    }

    #[test]
    fn failed_write_keeps_value_and_reports_after_signal_update() {
        let _ = create_runtime();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let signal_slot: Rc<Cell<Option<Signal<u8>>>> = Rc::new(Cell::new(None));

        let slot = signal_slot.clone();
        let sink = observed.clone();
        let on_error = Callback::new(move |err: StorageError| {
            let seen = slot.get().map(|value| value.get_untracked());
            sink.borrow_mut().push((err, seen));
        });
        let (value, setter) = use_storage(
            Some(FullStore),
            "draft",
            Initial::value(0_u8),
            Some(on_error),
        );
        signal_slot.set(Some(value));

        setter.set(9);

        assert_eq!(value.get_untracked(), 9);
        assert_eq!(
            *observed.borrow(),
            vec![(StorageError::write("draft", "QuotaExceededError"), Some(9))]
        );
    }

    #[test]
    fn error_callback_may_call_the_setter_again() {
        let _ = create_runtime();
        let retried = Rc::new(Cell::new(false));
        let setter_slot: Rc<RefCell<Option<StorageSetter<u8>>>> = Rc::new(RefCell::new(None));

        let slot = setter_slot.clone();
        let flag = retried.clone();
        let on_error = Callback::new(move |_err: StorageError| {
            if flag.replace(true) {
                return;
            }
            if let Some(setter) = *slot.borrow() {
                setter.update(|prev| prev + 1);
            }
        });
        let (value, setter) = use_storage(
            Some(FullStore),
            "retry",
            Initial::value(1_u8),
            Some(on_error),
        );
        *setter_slot.borrow_mut() = Some(setter);

        setter.set(5);

        assert!(retried.get());
        assert_eq!(value.get_untracked(), 6);
    }

    #[test]
    fn missing_store_is_memory_only_and_silent() {
        let _ = create_runtime();
        let (on_error, errors) = collect_errors();

        let (value, setter) = use_storage(
            None::<MemoryKeyValueStore>,
            "count",
            Initial::value(1_i64),
            Some(on_error),
        );
        setter.set(10);
        setter.update(|prev| prev * 3);

        assert_eq!(value.get_untracked(), 30);
        assert!(!setter.is_persisted());
        assert!(errors.borrow().is_empty());
    }

    #[cfg(not(any(target_arch = "wasm32", feature = "host-memory-stub")))]
    #[test]
    fn web_storage_without_dom_degrades_to_memory() {
        let _ = create_runtime();
        let (on_error, errors) = collect_errors();

        let (local, set_local) = use_local_storage(
            "theme",
            Initial::value("light".to_string()),
            Some(on_error),
        );
        let (session, set_session) = use_session_storage("tab", Initial::value(0_u32), None);
        set_local.set("dark".to_string());
        set_session.update(|prev| prev + 2);

        assert_eq!(local.get_untracked(), "dark");
        assert_eq!(session.get_untracked(), 2);
        assert!(!set_local.is_persisted());
        assert!(errors.borrow().is_empty());
    }

    #[cfg(feature = "host-memory-stub")]
    #[test]
    fn memory_stub_shares_slots_between_hooks() {
        let _ = create_runtime();
        let (_, first) = use_local_storage("stub.shared", Initial::value(0_u32), None);
        first.set(7);

        let (second, _) = use_local_storage("stub.shared", Initial::value(0_u32), None);
        let (session, _) = use_session_storage("stub.shared", Initial::value(0_u32), None);

        assert_eq!(second.get_untracked(), 7);
        assert_eq!(session.get_untracked(), 0);
    }
}
