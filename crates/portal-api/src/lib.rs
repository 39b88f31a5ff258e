//! HTTP API layer: router, handlers, extractors and state wiring.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
