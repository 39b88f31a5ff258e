//! Object storage backends and URL signing.

pub mod providers;
pub mod signed;

pub use providers::local::LocalObjectStore;
pub use providers::s3::S3ObjectStore;
pub use signed::UrlSigner;
