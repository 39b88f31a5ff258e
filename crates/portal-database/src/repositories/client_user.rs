//! Client/user link repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::client_user::model::ClientUser;

/// Repository for the client/user access link table.
#[derive(Debug, Clone)]
pub struct ClientUserRepository {
    pool: PgPool,
}

impl ClientUserRepository {
    /// Create a new client/user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The client a user is linked to, if any.
    pub async fn find_client_id_by_user(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT client_id FROM client_users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client link", e)
            })
    }

    /// Link a user to a client. A user can be linked to one client only.
    pub async fn link(&self, user_id: Uuid, client_id: Uuid) -> AppResult<ClientUser> {
        sqlx::query_as::<_, ClientUser>(
            "INSERT INTO client_users (user_id, client_id, created_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id) DO UPDATE SET client_id = EXCLUDED.client_id \
             RETURNING *",
        )
        .bind(user_id)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link user", e))
    }

    /// Remove a user's client link.
    pub async fn unlink(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM client_users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlink user", e))?;
        Ok(())
    }
}
