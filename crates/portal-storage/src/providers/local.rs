//! Local filesystem object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::traits::store::{ObjectStore, SignedUrl, StorageObjectMeta};

use crate::signed::UrlSigner;

/// Object store backed by a directory on the local filesystem.
///
/// Paths map directly to directories under the root, so the physical
/// `client/year/month/category` layout is visible on disk.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Root directory for all stored documents.
    root: PathBuf,
    /// Signs download URLs.
    signer: UrlSigner,
    /// Base URL the signed download route is served under.
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a local object store rooted at the given path.
    pub async fn new(
        root_path: &str,
        signer: UrlSigner,
        public_base_url: impl Into<String>,
    ) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            signer,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative path to an absolute path within the root.
    ///
    /// Rejects traversal components so a crafted path cannot escape the
    /// root directory.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = path.trim_start_matches('/');
        if Path::new(clean)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(clean))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<StorageObjectMeta>> {
        let full_path = self.resolve(prefix)?;
        if !full_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {prefix}"),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let entry_meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            let last_modified = entry_meta
                .modified()
                .ok()
                .map(chrono::DateTime::<chrono::Utc>::from);

            // Files always carry a MIME type; a missing one marks a folder
            // to the hierarchy resolver.
            entries.push(StorageObjectMeta {
                mime_type: if entry_meta.is_file() {
                    Some(
                        mime_from_path(&name)
                            .unwrap_or_else(|| "application/octet-stream".to_string()),
                    )
                } else {
                    None
                },
                name,
                size_bytes: if entry_meta.is_file() { entry_meta.len() } else { 0 },
                last_modified,
                is_directory: entry_meta.is_dir(),
            });
        }

        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then(a.name.cmp(&b.name))
        });

        Ok(entries)
    }

    async fn upload(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {path}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.resolve(path)?.exists())
    }

    async fn create_signed_url(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl> {
        if !self.exists(path).await? {
            return Err(AppError::not_found(format!("File not found: {path}")));
        }

        let expires_at = chrono::Utc::now().timestamp() + ttl_seconds as i64;
        let token = self.signer.token(path, expires_at);
        let signed_url = format!(
            "{}/api/documents/signed/{}?expires={}&token={}",
            self.public_base_url, path, expires_at, token
        );

        Ok(SignedUrl { signed_url, expires_at })
    }
}

/// Guess MIME type from a file name extension.
pub fn mime_from_path(path: &str) -> Option<String> {
    let ext = path.rsplit('.').next()?.to_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(dir: &tempfile::TempDir) -> LocalObjectStore {
        LocalObjectStore::new(
            dir.path().to_str().unwrap(),
            UrlSigner::new("test-secret"),
            "http://localhost:8080",
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let data = Bytes::from("hello world");
        store.upload("c1/2023/01/invoices/a.txt", data.clone()).await.unwrap();

        assert!(store.exists("c1/2023/01/invoices/a.txt").await.unwrap());
        assert_eq!(store.read_bytes("c1/2023/01/invoices/a.txt").await.unwrap(), data);

        store.delete("c1/2023/01/invoices/a.txt").await.unwrap();
        assert!(!store.exists("c1/2023/01/invoices/a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_folders_first_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store.upload("c1/b.txt", Bytes::from("b")).await.unwrap();
        store.upload("c1/a.txt", Bytes::from("a")).await.unwrap();
        store.upload("c1/2023/x.txt", Bytes::from("x")).await.unwrap();

        let entries = store.list("c1").await.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].name, "2023");
        assert_eq!(entries[1].name, "a.txt");
        assert_eq!(entries[2].name, "b.txt");
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        assert!(store.list("no/such/prefix").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_folder_entries_have_no_mime() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store.upload("c1/2023/x.pdf", Bytes::from("x")).await.unwrap();

        let entries = store.list("c1/2023").await.unwrap();
        assert_eq!(entries[0].mime_type, Some("application/pdf".into()));

        let top = store.list("c1").await.unwrap();
        assert!(top[0].is_folder());
    }

    #[tokio::test]
    async fn test_extensionless_file_is_not_a_folder() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .upload("c1/2023/01/invoices/1700000000000-ab12cd34", Bytes::from("x"))
            .await
            .unwrap();

        let entries = store.list("c1/2023/01/invoices").await.unwrap();
        assert!(!entries[0].is_directory);
        assert!(!entries[0].is_folder());
        assert_eq!(
            entries[0].mime_type,
            Some("application/octet-stream".into())
        );
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        assert!(store.read_bytes("../outside.txt").await.is_err());
    }

    #[tokio::test]
    async fn test_signed_url_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.upload("c1/file.pdf", Bytes::from("x")).await.unwrap();

        let url = store.create_signed_url("c1/file.pdf", 60).await.unwrap();
        assert!(url.signed_url.contains("c1/file.pdf"));
        assert!(url.expires_at > chrono::Utc::now().timestamp());

        let signer = UrlSigner::new("test-secret");
        let token = url
            .signed_url
            .rsplit("token=")
            .next()
            .unwrap()
            .to_string();
        assert!(signer.verify("c1/file.pdf", url.expires_at, &token));
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_from_path("file.pdf"), Some("application/pdf".into()));
        assert_eq!(mime_from_path("img.PNG"), Some("image/png".into()));
        assert_eq!(mime_from_path("noext"), None);
    }
}
