//! Client management handlers (accountant-facing).

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use portal_core::error::AppError;
use portal_entity::client::model::CreateClient;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Payload for creating a client record.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_type: Option<String>,
}

/// Payload for updating a client record. Absent fields keep their value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_type: Option<String>,
}

/// Payload for granting a portal user access to a client.
#[derive(Debug, Deserialize)]
pub struct GrantAccessRequest {
    pub user_id: Uuid,
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    let clients = state.client_service.list(auth.user_id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": clients }),
    ))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateClientRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let client = state
        .client_service
        .create(CreateClient {
            accountant_id: auth.user_id,
            user_id: None,
            name: req.name,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            client_type: req.client_type,
        })
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if !auth.is_accountant() {
        let own = state.client_service.client_for_user(auth.user_id).await?;
        if own != Some(id) {
            return Err(AppError::forbidden("Access to this client is not permitted").into());
        }
    }

    let client = state.client_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut client = state.client_service.get(id).await?;
    if req.name.is_some() {
        client.name = req.name;
    }
    if req.first_name.is_some() {
        client.first_name = req.first_name;
    }
    if req.last_name.is_some() {
        client.last_name = req.last_name;
    }
    if req.email.is_some() {
        client.email = req.email;
    }
    if req.phone.is_some() {
        client.phone = req.phone;
    }
    if req.client_type.is_some() {
        client.client_type = req.client_type;
    }

    let updated = state.client_service.update(&client).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": updated })))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    state.client_service.delete(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": null })))
}

/// POST /api/clients/{id}/access
pub async fn grant_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<GrantAccessRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    let client = state.client_service.grant_access(id, req.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}
