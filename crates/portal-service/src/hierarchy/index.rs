//! Relational index behind the hierarchy resolver.

use async_trait::async_trait;
use uuid::Uuid;

use portal_core::result::AppResult;
use portal_database::repositories::{ClientRepository, DocumentRepository};
use portal_entity::client::model::Client;
use portal_entity::document::model::Document;

/// The relational side of hierarchy resolution.
///
/// The resolver consults this only when object storage has no physical
/// folder for a path; keeping it behind a trait lets tests drive the
/// resolver with an in-memory index.
#[async_trait]
pub trait HierarchyIndex: Send + Sync + std::fmt::Debug + 'static {
    /// All client records.
    async fn list_clients(&self) -> AppResult<Vec<Client>>;

    /// One client record by id.
    async fn find_client(&self, id: Uuid) -> AppResult<Option<Client>>;

    /// All documents for one client.
    async fn documents_for_client(&self, client_id: Uuid) -> AppResult<Vec<Document>>;

    /// Documents for one client whose `file_path` starts with the prefix.
    async fn documents_with_prefix(
        &self,
        client_id: Uuid,
        prefix: &str,
    ) -> AppResult<Vec<Document>>;
}

/// `HierarchyIndex` backed by the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct DatabaseIndex {
    clients: ClientRepository,
    documents: DocumentRepository,
}

impl DatabaseIndex {
    /// Create a database-backed index.
    pub fn new(clients: ClientRepository, documents: DocumentRepository) -> Self {
        Self { clients, documents }
    }
}

#[async_trait]
impl HierarchyIndex for DatabaseIndex {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.clients.list_all().await
    }

    async fn find_client(&self, id: Uuid) -> AppResult<Option<Client>> {
        self.clients.find_by_id(id).await
    }

    async fn documents_for_client(&self, client_id: Uuid) -> AppResult<Vec<Document>> {
        self.documents.find_by_client(client_id).await
    }

    async fn documents_with_prefix(
        &self,
        client_id: Uuid,
        prefix: &str,
    ) -> AppResult<Vec<Document>> {
        self.documents
            .find_by_client_and_prefix(client_id, prefix)
            .await
    }
}
