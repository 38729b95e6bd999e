//! Leptos hooks that bind browser platform facilities to reactive state.
//!
//! Each hook subscribes on creation, mirrors the facility into a signal and unsubscribes through
//! `on_cleanup` when the owning scope is disposed. The hooks share no state with each other.
//!
//! # Example
//!
//! ```rust
//! use leptos::*;
//! use platform_hooks::{use_storage, Initial, MemoryKeyValueStore};
//!
//! let _ = create_runtime();
//! let store = MemoryKeyValueStore::default();
//! let (visits, set_visits) =
//!     use_storage(Some(store.clone()), "visits", Initial::value(0_u32), None);
//!
//! set_visits.update(|count| count + 1);
//! assert_eq!(visits.get_untracked(), 1);
//! assert_eq!(store.raw("visits").as_deref(), Some("1"));
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod events;
mod geolocation;
mod interval;
mod network;
mod storage;
mod subscription;

pub use events::{
    use_event_callback, use_event_listener, use_window_event_listener, EventCallback,
};
pub use geolocation::{use_geolocation, GeolocationReading};
pub use interval::use_interval;
pub use network::use_network_availability;
pub use platform_host::{
    GeolocationError, GeolocationErrorCode, GeolocationOptions, GeolocationPosition, Initial,
    KeyValueStore, MemoryKeyValueStore, StorageError, StorageErrorKind, Update,
};
pub use platform_host_web::{host_strategy_name, ListenerOptions};
pub use storage::{use_local_storage, use_session_storage, use_storage, StorageSetter};
