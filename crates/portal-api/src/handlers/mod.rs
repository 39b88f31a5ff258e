//! HTTP request handlers.

pub mod browse;
pub mod clients;
pub mod documents;
pub mod health;
