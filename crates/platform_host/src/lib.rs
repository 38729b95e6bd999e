//! Typed host-domain contracts shared by the browser adapters and the reactive hooks.
//!
//! This crate is framework-free and target-independent. It owns the key/value storage contract,
//! the persisted value core, geolocation readings, memoized capability probes and subscription
//! teardown handles, while concrete browser adapters live in `platform_host_web` and Leptos
//! bindings in `platform_hooks`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod capability;
pub mod geolocation;
pub mod lifecycle;
pub mod storage;

pub use capability::CapabilityProbe;
pub use geolocation::{
    GeolocationError, GeolocationErrorCode, GeolocationOptions, GeolocationPosition,
};
pub use lifecycle::{Teardown, TeardownSet};
pub use storage::persisted::read_slot;
pub use storage::{
    ErrorCallback, Initial, KeyValueStore, MemoryKeyValueStore, PersistedValue, StorageError,
    StorageErrorKind, Update,
};
