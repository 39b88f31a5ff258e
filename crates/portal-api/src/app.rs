//! Application builder — wires storage, repositories, services and the
//! router together and runs the HTTP server.

use std::sync::Arc;

use tracing::info;

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::store::ObjectStore;
use portal_database::DatabasePool;
use portal_database::repositories::{ClientRepository, ClientUserRepository, DocumentRepository};
use portal_service::client::service::ClientService;
use portal_service::document::service::DocumentService;
use portal_service::document::upload::UploadService;
use portal_service::hierarchy::index::DatabaseIndex;
use portal_service::hierarchy::names::ClientNames;
use portal_service::hierarchy::resolver::HierarchyResolver;
use portal_storage::providers::local::LocalObjectStore;
use portal_storage::providers::s3::S3ObjectStore;
use portal_storage::signed::UrlSigner;

use crate::router::build_router;
use crate::state::AppState;

/// Build the shared application state from configuration and a pool.
pub async fn build_state(config: AppConfig, db: DatabasePool) -> AppResult<AppState> {
    let signer = UrlSigner::new(config.storage.url_signing_secret.clone());
    let store = build_store(&config, signer.clone()).await?;
    info!(provider = store.provider_type(), "Storage provider initialized");

    let client_repo = ClientRepository::new(db.pool().clone());
    let document_repo = DocumentRepository::new(db.pool().clone());
    let link_repo = ClientUserRepository::new(db.pool().clone());

    let names = Arc::new(ClientNames::default());
    let index = Arc::new(DatabaseIndex::new(client_repo.clone(), document_repo.clone()));
    let resolver = Arc::new(HierarchyResolver::new(
        Arc::clone(&store),
        index,
        Arc::clone(&names),
    ));

    let client_service = Arc::new(ClientService::new(
        client_repo,
        link_repo,
        Arc::clone(&names),
    ));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&store),
        document_repo.clone(),
        config.storage.max_upload_size_bytes,
    ));
    let document_service = Arc::new(DocumentService::new(
        Arc::clone(&store),
        document_repo,
        config.storage.signed_url_ttl_seconds,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db,
        store,
        signer: Arc::new(signer),
        names,
        resolver,
        client_service,
        upload_service,
        document_service,
    })
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Portal server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Portal server shut down gracefully");
    Ok(())
}

/// Instantiate the configured storage provider.
async fn build_store(config: &AppConfig, signer: UrlSigner) -> AppResult<Arc<dyn ObjectStore>> {
    match config.storage.provider.as_str() {
        "local" => {
            let store = LocalObjectStore::new(
                &config.storage.local.root_path,
                signer,
                config.storage.public_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }
        "s3" => Ok(Arc::new(S3ObjectStore::new(&config.storage))),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider: {other}"
        ))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
