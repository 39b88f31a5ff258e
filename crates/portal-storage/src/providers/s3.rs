//! S3-compatible object store.
//!
//! Placeholder until the hosted deployment lands; every operation returns
//! `NotImplemented`. Selecting `provider = "s3"` in configuration wires this
//! type in, so the rest of the stack is already provider-agnostic.

use async_trait::async_trait;
use bytes::Bytes;

use portal_core::config::StorageConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::store::{ObjectStore, SignedUrl, StorageObjectMeta};

/// Object store backed by an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    bucket: String,
}

impl S3ObjectStore {
    /// Create an S3 object store from configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            bucket: config.s3.bucket.clone(),
        }
    }

    /// The configured bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn list(&self, _prefix: &str) -> AppResult<Vec<StorageObjectMeta>> {
        Err(AppError::not_implemented("S3 list is not implemented yet"))
    }

    async fn upload(&self, _path: &str, _data: Bytes) -> AppResult<()> {
        Err(AppError::not_implemented("S3 upload is not implemented yet"))
    }

    async fn read_bytes(&self, _path: &str) -> AppResult<Bytes> {
        Err(AppError::not_implemented("S3 read is not implemented yet"))
    }

    async fn delete(&self, _path: &str) -> AppResult<()> {
        Err(AppError::not_implemented("S3 delete is not implemented yet"))
    }

    async fn exists(&self, _path: &str) -> AppResult<bool> {
        Err(AppError::not_implemented("S3 exists is not implemented yet"))
    }

    async fn create_signed_url(&self, _path: &str, _ttl_seconds: u64) -> AppResult<SignedUrl> {
        Err(AppError::not_implemented(
            "S3 signed URLs are not implemented yet",
        ))
    }
}
