//! `localStorage`/`sessionStorage`-backed key/value store.
//!
//! Calls are synchronous at the browser API boundary. On non-wasm targets every call reports
//! [`StorageError::Unavailable`]; callers are expected to consult the access probes in
//! [`crate::adapters`] first.

use platform_host::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which Web Storage area a [`WebStorage`] reads and writes.
pub enum WebStorageKind {
    /// `window.localStorage`, durable across sessions.
    Local,
    /// `window.sessionStorage`, scoped to the tab session.
    Session,
}

impl WebStorageKind {
    /// JavaScript name of the storage area.
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browser key/value store backed by one Web Storage area.
pub struct WebStorage {
    kind: WebStorageKind,
}

impl WebStorage {
    /// Store backed by `window.localStorage`.
    pub const fn local() -> Self {
        Self {
            kind: WebStorageKind::Local,
        }
    }

    /// Store backed by `window.sessionStorage`.
    pub const fn session() -> Self {
        Self {
            kind: WebStorageKind::Session,
        }
    }

    /// Storage area this store targets.
    pub const fn kind(self) -> WebStorageKind {
        self.kind
    }

    /// Returns `true` when the storage area can be reached from this context.
    ///
    /// Accessing the area throws in sandboxed frames and when storage is disabled by policy.
    pub fn is_accessible(self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage().is_ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Result<web_sys::Storage, StorageError> {
        let name = self.kind.api_name();
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window unavailable".to_string()))?;
        let storage = match self.kind {
            WebStorageKind::Local => window.local_storage(),
            WebStorageKind::Session => window.session_storage(),
        };
        storage
            .map_err(|e| StorageError::Unavailable(format!("{name} access denied: {e:?}")))?
            .ok_or_else(|| StorageError::Unavailable(format!("{name} unavailable")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported(kind: WebStorageKind) -> StorageError {
    StorageError::Unavailable(format!(
        "{} is only available when compiled for wasm32",
        kind.api_name()
    ))
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = self.storage()?;
            storage
                .get_item(key)
                .map_err(|e| StorageError::read(key, format!("{e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(unsupported(self.kind))
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = self.storage()?;
            storage.set_item(key, value).map_err(|e| {
                StorageError::write(
                    key,
                    format!("{} set_item failed: {e:?}", self.kind.api_name()),
                )
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(unsupported(self.kind))
        }
    }
}
