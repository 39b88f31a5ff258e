//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "data": { "status": "ok" } }))
}

/// GET /api/health/detailed
pub async fn detailed_health(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let database = state.db.health_check().await.unwrap_or(false);
    let storage = state.store.health_check().await.unwrap_or(false);

    let status = if database && storage { "ok" } else { "degraded" };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "status": status,
            "database": database,
            "storage": storage,
            "storage_provider": state.store.provider_type(),
        },
    })))
}
