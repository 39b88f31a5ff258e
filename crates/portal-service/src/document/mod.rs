//! Document upload and retrieval.

pub mod service;
pub mod upload;

pub use service::DocumentService;
pub use upload::{BatchUploadOutcome, UploadRequest, UploadService};
