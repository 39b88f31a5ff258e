//! In-memory fakes for hierarchy tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::store::{ObjectStore, SignedUrl, StorageObjectMeta};
use portal_entity::client::model::Client;
use portal_entity::document::model::Document;

use super::index::HierarchyIndex;

/// A folder entry as a storage listing would return it.
pub fn folder_entry(name: &str) -> StorageObjectMeta {
    StorageObjectMeta {
        name: name.to_string(),
        size_bytes: 0,
        mime_type: None,
        last_modified: Some(Utc::now()),
        is_directory: true,
    }
}

/// A file entry as a storage listing would return it.
pub fn file_entry(name: &str, mime: &str) -> StorageObjectMeta {
    StorageObjectMeta {
        name: name.to_string(),
        size_bytes: 42,
        mime_type: Some(mime.to_string()),
        last_modified: Some(Utc::now()),
        is_directory: false,
    }
}

/// Object store serving canned listings.
#[derive(Debug, Default)]
pub struct FakeStore {
    listings: Mutex<HashMap<String, Vec<StorageObjectMeta>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub fail: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing returned for a prefix.
    pub fn insert(&self, prefix: &str, entries: Vec<StorageObjectMeta>) {
        self.listings
            .lock()
            .unwrap()
            .insert(prefix.to_string(), entries);
    }

    /// Block `list` calls on a prefix until the notify fires.
    pub fn gate(&self, prefix: &str, notify: Arc<Notify>) {
        self.gates
            .lock()
            .unwrap()
            .insert(prefix.to_string(), notify);
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    fn provider_type(&self) -> &str {
        "fake"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<StorageObjectMeta>> {
        let gate = self.gates.lock().unwrap().get(prefix).cloned();
        if let Some(notify) = gate {
            notify.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::storage("listing unavailable"));
        }
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(prefix)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload(&self, _path: &str, _data: Bytes) -> AppResult<()> {
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        Err(AppError::not_found(format!("File not found: {path}")))
    }

    async fn delete(&self, _path: &str) -> AppResult<()> {
        Ok(())
    }

    async fn exists(&self, _path: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn create_signed_url(&self, _path: &str, _ttl_seconds: u64) -> AppResult<SignedUrl> {
        Err(AppError::not_implemented("no signing in fake store"))
    }
}

/// Hierarchy index over in-memory rows, counting how often it is hit.
#[derive(Debug, Default)]
pub struct FakeIndex {
    clients: Vec<Client>,
    documents: Vec<Document>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeIndex {
    pub fn with_client(mut self, id: Uuid, name: Option<&str>) -> Self {
        self.clients.push(Client {
            id,
            accountant_id: Uuid::nil(),
            user_id: None,
            name: name.map(String::from),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            client_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        self
    }

    pub fn with_document(mut self, client_id: Uuid, file_path: &str, category: Option<&str>) -> Self {
        let filename = file_path.rsplit('/').next().unwrap_or_default().to_string();
        self.documents.push(Document {
            id: Uuid::new_v4(),
            client_id,
            file_path: file_path.to_string(),
            filename,
            category: category.map(String::from),
            file_type: None,
            size_bytes: 0,
            uploaded_at: Utc::now(),
        });
        self
    }
}

#[async_trait]
impl HierarchyIndex for FakeIndex {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.clients.clone())
    }

    async fn find_client(&self, id: Uuid) -> AppResult<Option<Client>> {
        Ok(self.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn documents_for_client(&self, client_id: Uuid) -> AppResult<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .documents
            .iter()
            .filter(|d| d.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn documents_with_prefix(
        &self,
        client_id: Uuid,
        prefix: &str,
    ) -> AppResult<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .documents
            .iter()
            .filter(|d| d.client_id == client_id && d.file_path.starts_with(prefix))
            .cloned()
            .collect())
    }
}
