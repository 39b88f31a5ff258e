//! Object-store trait for pluggable document storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Metadata about one entry returned from a listing.
///
/// Folders carry no MIME type; the hierarchy resolver relies on that to
/// tell folders and files apart.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageObjectMeta {
    /// Entry name (the last path component, not the full path).
    pub name: String,
    /// Size in bytes (0 for folders).
    pub size_bytes: u64,
    /// MIME type, present only for files.
    pub mime_type: Option<String>,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// Whether this entry is a folder.
    pub is_directory: bool,
}

impl StorageObjectMeta {
    /// Whether this entry represents a folder (no MIME metadata).
    pub fn is_folder(&self) -> bool {
        self.mime_type.is_none()
    }
}

/// A time-limited URL granting read access to one object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedUrl {
    /// The full URL, including the signature token.
    pub signed_url: String,
    /// Unix timestamp at which the URL stops working.
    pub expires_at: i64,
}

/// Trait for document storage backends.
///
/// The portal stores documents in a single logical bucket addressed by
/// slash-delimited paths (`client/year/month/category/file`). The trait is
/// defined here in `portal-core` and implemented in `portal-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// List the direct children of a prefix. A missing prefix yields an
    /// empty listing, not an error.
    async fn list(&self, prefix: &str) -> AppResult<Vec<StorageObjectMeta>>;

    /// Write an object at the given path, creating parents as needed.
    async fn upload(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read an object into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether an object or folder exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Create a time-limited signed URL for downloading one object.
    async fn create_signed_url(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl>;
}
