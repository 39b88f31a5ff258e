//! Traits implemented by the storage layer.

pub mod store;
