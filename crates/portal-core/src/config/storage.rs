//! Document storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Default TTL for signed download URLs, in seconds.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
    /// Secret used to sign download URLs.
    #[serde(default = "default_signing_secret")]
    pub url_signing_secret: String,
    /// Public base URL under which signed paths are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for the document bucket.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MB
}

fn default_signed_url_ttl() -> u64 {
    60
}

fn default_signing_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_local_root() -> String {
    "./data/client-documents".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
