//! Virtual hierarchy browsing.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::hierarchy::path::NavPath;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query parameters for the browse endpoint.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Slash-delimited navigation path; empty means the root listing.
    #[serde(default)]
    pub path: String,
}

/// GET /api/documents/browse?path=client/year/month
pub async fn browse(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BrowseQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let path = scoped_path(&state, &auth, NavPath::parse(&query.path)).await?;

    state.resolver.ensure_client_name(&path).await?;
    let items = state.resolver.resolve(&path).await?;
    let breadcrumbs = state.resolver.breadcrumbs(&path).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "path": path.join(),
            "items": items,
            "breadcrumbs": breadcrumbs,
        },
    })))
}

/// Pin client-role callers to their own subtree. A client browsing the
/// root lands inside their own folder instead of the client list.
async fn scoped_path(state: &AppState, auth: &AuthUser, path: NavPath) -> AppResult<NavPath> {
    if auth.is_accountant() {
        return Ok(path);
    }

    let client_id = state
        .client_service
        .client_for_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::forbidden("No client access configured"))?;
    let own = client_id.to_string();

    match path.client_segment() {
        None => Ok(NavPath::new([own])),
        Some(segment) if segment == own => Ok(path),
        Some(_) => Err(AppError::forbidden("Access to this client is not permitted")),
    }
}
