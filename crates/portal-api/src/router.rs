//! Route definitions for the portal HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(browse_routes())
        .merge(client_routes())
        .merge(document_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Virtual hierarchy browsing
fn browse_routes() -> Router<AppState> {
    Router::new().route("/documents/browse", get(handlers::browse::browse))
}

/// Client CRUD and access management
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(handlers::clients::list_clients))
        .route("/clients", post(handlers::clients::create_client))
        .route("/clients/{id}", get(handlers::clients::get_client))
        .route("/clients/{id}", put(handlers::clients::update_client))
        .route("/clients/{id}", delete(handlers::clients::delete_client))
        .route("/clients/{id}/access", post(handlers::clients::grant_access))
}

/// Upload, listing and downloads
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/upload",
            post(handlers::documents::upload_documents),
        )
        .route(
            "/documents/recent",
            get(handlers::documents::recent_documents),
        )
        .route(
            "/documents/client/{id}",
            get(handlers::documents::list_client_documents),
        )
        .route(
            "/documents/download-url",
            get(handlers::documents::download_url),
        )
        .route(
            "/documents/signed/{*path}",
            get(handlers::documents::download_signed),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods).allow_headers(Any);

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
