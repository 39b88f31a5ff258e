//! Document retrieval service.

use std::sync::Arc;

use uuid::Uuid;

use portal_core::result::AppResult;
use portal_core::traits::store::{ObjectStore, SignedUrl};
use portal_database::repositories::DocumentRepository;
use portal_entity::document::model::Document;

/// Read-side document operations: listings, recents and signed downloads.
#[derive(Debug, Clone)]
pub struct DocumentService {
    store: Arc<dyn ObjectStore>,
    documents: DocumentRepository,
    signed_url_ttl_seconds: u64,
}

impl DocumentService {
    /// Create a document service.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        documents: DocumentRepository,
        signed_url_ttl_seconds: u64,
    ) -> Self {
        Self { store, documents, signed_url_ttl_seconds }
    }

    /// All documents for one client, newest first.
    pub async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Document>> {
        self.documents.find_by_client(client_id).await
    }

    /// The most recent uploads across one accountant's clients.
    pub async fn recent(&self, accountant_id: Uuid, limit: i64) -> AppResult<Vec<Document>> {
        self.documents.find_recent(accountant_id, limit).await
    }

    /// A time-limited download URL for one storage path.
    pub async fn signed_download(&self, path: &str) -> AppResult<SignedUrl> {
        self.store
            .create_signed_url(path, self.signed_url_ttl_seconds)
            .await
    }
}
