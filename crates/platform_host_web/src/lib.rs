//! Browser (`wasm32`) implementations of [`platform_host`] contracts.
//!
//! This crate is the concrete browser-side wiring layer for Web Storage, network status,
//! geolocation, event listeners and intervals. Every browser call is gated on
//! `target_arch = "wasm32"`; other targets compile to inert fallbacks so that server-side
//! rendering and native tests work.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and store factories.
pub mod adapters;
pub mod events;
pub mod geolocation;
pub mod network;
pub mod storage;

pub use adapters::{
    can_access_storage, host_strategy_name, local_storage, selected_host_strategy,
    session_storage, web_storage, HostStrategy, KeyValueStoreAdapter,
};
pub use events::{
    managed_event_listener, managed_interval, managed_window_event_listener, ListenerOptions,
};
pub use geolocation::managed_geolocation_watch;
pub use network::{can_use_dom, navigator_on_line};
pub use storage::web_storage::{WebStorage, WebStorageKind};
