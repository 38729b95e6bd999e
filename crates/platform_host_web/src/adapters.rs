use platform_host::{CapabilityProbe, KeyValueStore, MemoryKeyValueStore, StorageError};

use crate::{WebStorage, WebStorageKind};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, `sessionStorage`).
    Browser,
    /// Thread-local in-memory stores, for tests and server-side rendering.
    MemoryStub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-memory-stub")]
    {
        HostStrategy::MemoryStub
    }

    #[cfg(not(feature = "host-memory-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::MemoryStub => "memory-stub",
    }
}

/// Adapter enum that erases the concrete key/value backend behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser Web Storage area.
    Browser(WebStorage),
    /// Process-local in-memory store.
    MemoryStub(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Browser(store) => store.get_item(key),
            Self::MemoryStub(store) => store.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Browser(store) => store.set_item(key, value),
            Self::MemoryStub(store) => store.set_item(key, value),
        }
    }
}

static LOCAL_STORAGE_ACCESS: CapabilityProbe = CapabilityProbe::new();
static SESSION_STORAGE_ACCESS: CapabilityProbe = CapabilityProbe::new();

thread_local! {
    static MEMORY_LOCAL_STORAGE: MemoryKeyValueStore = MemoryKeyValueStore::default();
    static MEMORY_SESSION_STORAGE: MemoryKeyValueStore = MemoryKeyValueStore::default();
}

/// Returns `true` when the storage area is reachable. Probed once per process.
pub fn can_access_storage(kind: WebStorageKind) -> bool {
    match selected_host_strategy() {
        HostStrategy::Browser => {
            let (probe, store) = match kind {
                WebStorageKind::Local => (&LOCAL_STORAGE_ACCESS, WebStorage::local()),
                WebStorageKind::Session => (&SESSION_STORAGE_ACCESS, WebStorage::session()),
            };
            probe.get_or_probe(|| store.is_accessible())
        }
        HostStrategy::MemoryStub => true,
    }
}

/// Builds the store for `kind`, or `None` when the area cannot be accessed.
pub fn web_storage(kind: WebStorageKind) -> Option<KeyValueStoreAdapter> {
    if !can_access_storage(kind) {
        return None;
    }
    let adapter = match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(match kind {
            WebStorageKind::Local => WebStorage::local(),
            WebStorageKind::Session => WebStorage::session(),
        }),
        HostStrategy::MemoryStub => KeyValueStoreAdapter::MemoryStub(match kind {
            WebStorageKind::Local => MEMORY_LOCAL_STORAGE.with(Clone::clone),
            WebStorageKind::Session => MEMORY_SESSION_STORAGE.with(Clone::clone),
        }),
    };
    Some(adapter)
}

/// Builds the durable (`localStorage`) store for the selected host strategy.
pub fn local_storage() -> Option<KeyValueStoreAdapter> {
    web_storage(WebStorageKind::Local)
}

/// Builds the tab-session (`sessionStorage`) store for the selected host strategy.
pub fn session_storage() -> Option<KeyValueStoreAdapter> {
    web_storage(WebStorageKind::Session)
}
