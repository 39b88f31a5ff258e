//! Document upload service.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::store::ObjectStore;
use portal_database::repositories::DocumentRepository;
use portal_entity::document::model::{CreateDocument, Document};

/// One file to upload into the hierarchy.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub client_id: Uuid,
    pub year: String,
    pub month: String,
    pub category: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// One failed file inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub filename: String,
    pub error: String,
}

/// Outcome of a batch upload. Files that made it in stay in; there is
/// no rollback when a later file in the batch fails.
#[derive(Debug, Clone, Serialize)]
pub struct BatchUploadOutcome {
    pub uploaded: Vec<Document>,
    pub failed: Vec<UploadFailure>,
}

/// Writes files into object storage and records them in the database.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    documents: DocumentRepository,
    max_size_bytes: u64,
}

impl UploadService {
    /// Create an upload service.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        documents: DocumentRepository,
        max_size_bytes: u64,
    ) -> Self {
        Self { store, documents, max_size_bytes }
    }

    /// Upload one file and record its metadata.
    ///
    /// The storage path is `client/year/month/<category-slug>/<unique>.<ext>`,
    /// so the physical layout always matches the virtual hierarchy.
    pub async fn upload(&self, request: UploadRequest) -> AppResult<Document> {
        if request.data.len() as u64 > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File {} exceeds the maximum upload size of {} bytes",
                request.filename, self.max_size_bytes
            )));
        }
        if request.filename.trim().is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        let file_path = build_storage_path(&request);
        self.store.upload(&file_path, request.data.clone()).await?;

        let document = self
            .documents
            .create(&CreateDocument {
                client_id: request.client_id,
                file_path: file_path.clone(),
                filename: request.filename.clone(),
                category: Some(request.category.clone()),
                file_type: request.content_type.clone(),
                size_bytes: request.data.len() as i64,
            })
            .await?;

        info!(
            client_id = %request.client_id,
            path = %file_path,
            bytes = request.data.len(),
            "Uploaded document"
        );
        Ok(document)
    }

    /// Upload a batch of files, collecting failures per file instead of
    /// aborting the whole batch.
    pub async fn upload_batch(&self, requests: Vec<UploadRequest>) -> BatchUploadOutcome {
        let mut outcome = BatchUploadOutcome {
            uploaded: Vec::new(),
            failed: Vec::new(),
        };

        for request in requests {
            let filename = request.filename.clone();
            match self.upload(request).await {
                Ok(document) => outcome.uploaded.push(document),
                Err(error) => {
                    warn!(filename = %filename, error = %error, "Upload failed");
                    outcome.failed.push(UploadFailure {
                        filename,
                        error: error.to_string(),
                    });
                }
            }
        }
        outcome
    }
}

/// Build the storage path for an upload request.
fn build_storage_path(request: &UploadRequest) -> String {
    let unique = Uuid::new_v4().simple().to_string();
    let stamp = chrono::Utc::now().timestamp_millis();
    let name = match request.filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            format!("{stamp}-{}.{}", &unique[..8], ext.to_lowercase())
        }
        _ => format!("{stamp}-{}", &unique[..8]),
    };
    format!(
        "{}/{}/{}/{}/{}",
        request.client_id,
        request.year,
        request.month,
        category_slug(&request.category),
        name
    )
}

/// Normalize a category label into a path segment.
fn category_slug(category: &str) -> String {
    category.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: &str, category: &str) -> UploadRequest {
        UploadRequest {
            client_id: Uuid::nil(),
            year: "2023".to_string(),
            month: "01".to_string(),
            category: category.to_string(),
            filename: filename.to_string(),
            content_type: Some("application/pdf".to_string()),
            data: Bytes::from("x"),
        }
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(category_slug("Bank Reports"), "bank_reports");
        assert_eq!(category_slug("  Invoices "), "invoices");
    }

    #[test]
    fn test_storage_path_layout() {
        let path = build_storage_path(&request("Statement.PDF", "Bank Reports"));
        let segments: Vec<&str> = path.split('/').collect();

        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Uuid::nil().to_string());
        assert_eq!(segments[1], "2023");
        assert_eq!(segments[2], "01");
        assert_eq!(segments[3], "bank_reports");
        assert!(segments[4].ends_with(".pdf"));
    }

    #[test]
    fn test_storage_path_without_extension() {
        let path = build_storage_path(&request("README", "misc"));
        assert!(!path.split('/').next_back().unwrap().contains('.'));
    }
}
