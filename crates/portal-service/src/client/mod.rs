//! Client record management.

pub mod service;

pub use service::ClientService;
