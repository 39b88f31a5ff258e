//! # portal-core
//!
//! Core crate for the accountant/client document portal. Contains the
//! unified error system, configuration schemas, and the object-store
//! trait consumed by the storage and service layers.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
