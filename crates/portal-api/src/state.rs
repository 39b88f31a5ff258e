//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portal_core::config::AppConfig;
use portal_core::traits::store::ObjectStore;
use portal_database::DatabasePool;
use portal_service::client::service::ClientService;
use portal_service::document::service::DocumentService;
use portal_service::document::upload::UploadService;
use portal_service::hierarchy::names::ClientNames;
use portal_service::hierarchy::resolver::HierarchyResolver;
use portal_storage::signed::UrlSigner;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Object storage backend
    pub store: Arc<dyn ObjectStore>,
    /// Verifies signed download URLs
    pub signer: Arc<UrlSigner>,
    /// Client display-name cache
    pub names: Arc<ClientNames>,
    /// Virtual hierarchy resolver
    pub resolver: Arc<HierarchyResolver>,
    /// Client management service
    pub client_service: Arc<ClientService>,
    /// Document upload service
    pub upload_service: Arc<UploadService>,
    /// Document retrieval service
    pub document_service: Arc<DocumentService>,
}
