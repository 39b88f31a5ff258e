//! `AuthUser` extractor — pulls the JWT from the Authorization header and
//! validates it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's role in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Manages clients and sees every client's documents.
    Accountant,
    /// Sees only the subtree of the client they are linked to.
    Client,
}

/// JWT claims carried by portal access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Portal role.
    pub role: UserRole,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Extracted authenticated user, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    /// Whether the caller is an accountant.
    pub fn is_accountant(&self) -> bool {
        self.role == UserRole::Accountant
    }

    /// Error unless the caller is an accountant.
    pub fn require_accountant(&self) -> AppResult<()> {
        if self.is_accountant() {
            Ok(())
        } else {
            Err(AppError::forbidden("Accountant role required"))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = state.config.auth.jwt_leeway_seconds;

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.auth.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::unauthorized(format!("Invalid token: {e}")))?;

        Ok(AuthUser {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
