//! Web Storage adapters.

pub mod web_storage;
