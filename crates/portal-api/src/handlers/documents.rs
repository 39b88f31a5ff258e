//! Document upload, listing and download handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_service::document::upload::UploadRequest;
use portal_storage::providers::local::mime_from_path;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query parameters for requesting a download URL.
#[derive(Debug, Deserialize)]
pub struct DownloadUrlQuery {
    pub path: String,
}

/// Query parameters on a signed download link.
#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub expires: i64,
    pub token: String,
}

/// Query parameters for the recent-uploads listing.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    20
}

/// POST /api/documents/upload (multipart)
///
/// Text fields `client_id`, `year`, `month` and `category` describe the
/// target folder; every `files` part is one document. Files that fail are
/// reported per file; the rest of the batch still goes through.
pub async fn upload_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let mut client_id: Option<Uuid> = None;
    let mut year: Option<String> = None;
    let mut month: Option<String> = None;
    let mut category: Option<String> = None;
    let mut files: Vec<(String, Option<String>, bytes::Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "client_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid client_id field: {e}")))?;
                client_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::validation("client_id must be a UUID"))?,
                );
            }
            "year" => {
                year = Some(read_text(field, "year").await?);
            }
            "month" => {
                month = Some(read_text(field, "month").await?);
            }
            "category" => {
                category = Some(read_text(field, "category").await?);
            }
            "files" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::validation("File part is missing a file name"))?;
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                files.push((filename, content_type, data));
            }
            _ => {}
        }
    }

    let client_id = client_id.ok_or_else(|| AppError::validation("client_id is required"))?;
    let year = year.ok_or_else(|| AppError::validation("year is required"))?;
    let month = month.ok_or_else(|| AppError::validation("month is required"))?;
    let category = category.ok_or_else(|| AppError::validation("category is required"))?;
    if files.is_empty() {
        return Err(AppError::validation("At least one file is required").into());
    }

    require_client_access(&state, &auth, client_id).await?;

    let requests = files
        .into_iter()
        .map(|(filename, content_type, data)| UploadRequest {
            client_id,
            year: year.clone(),
            month: month.clone(),
            category: category.clone(),
            filename,
            content_type,
            data,
        })
        .collect();

    let outcome = state.upload_service.upload_batch(requests).await;
    Ok(Json(serde_json::json!({
        "success": outcome.failed.is_empty(),
        "data": outcome,
    })))
}

/// GET /api/documents/client/{id}
pub async fn list_client_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_client_access(&state, &auth, id).await?;
    let documents = state.document_service.list_for_client(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": documents }),
    ))
}

/// GET /api/documents/recent?limit=20
pub async fn recent_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_accountant()?;
    let limit = query.limit.clamp(1, 100);
    let documents = state.document_service.recent(auth.user_id, limit).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": documents }),
    ))
}

/// GET /api/documents/download-url?path=client/year/month/category/file
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DownloadUrlQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let client_id = query
        .path
        .split('/')
        .next()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Path must start with a client id"))?;
    require_client_access(&state, &auth, client_id).await?;

    let url = state.document_service.signed_download(&query.path).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": url })))
}

/// GET /api/documents/signed/{*path}?expires=...&token=...
///
/// The token is the sole credential; no Authorization header is needed.
pub async fn download_signed(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<SignedQuery>,
) -> ApiResult<Response> {
    if !state.signer.verify(&path, query.expires, &query.token) {
        return Err(AppError::unauthorized("Invalid or expired download link").into());
    }

    let data = state.store.read_bytes(&path).await?;
    let content_type =
        mime_from_path(&path).unwrap_or_else(|| "application/octet-stream".to_string());
    let filename = path.rsplit('/').next().unwrap_or("download").to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    )
        .into_response())
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Invalid {name} field: {e}")))?;
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::validation(format!("{name} must not be empty")));
    }
    Ok(text)
}

/// Accountants may touch any client; client users only their own.
async fn require_client_access(
    state: &AppState,
    auth: &AuthUser,
    client_id: Uuid,
) -> AppResult<()> {
    if auth.is_accountant() {
        return Ok(());
    }
    let own = state.client_service.client_for_user(auth.user_id).await?;
    if own == Some(client_id) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Access to this client is not permitted",
        ))
    }
}
