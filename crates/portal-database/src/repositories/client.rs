//! Client repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::client::model::{Client, CreateClient};

/// Repository for client CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a client by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client", e))
    }

    /// List all clients, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    /// List clients managed by one accountant, newest first.
    pub async fn find_by_accountant(&self, accountant_id: Uuid) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE accountant_id = $1 ORDER BY created_at DESC",
        )
        .bind(accountant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    /// Insert a new client record.
    pub async fn create(&self, client: &CreateClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (id, accountant_id, user_id, name, first_name, last_name, \
             email, phone, client_type, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW()) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(client.accountant_id)
        .bind(client.user_id)
        .bind(&client.name)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.client_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create client", e))
    }

    /// Update a client record.
    pub async fn update(&self, client: &Client) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET user_id = $2, name = $3, first_name = $4, last_name = $5, \
             email = $6, phone = $7, client_type = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(client.id)
        .bind(client.user_id)
        .bind(&client.name)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.client_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update client", e))?
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", client.id)))
    }

    /// Link an auth user to a client record.
    pub async fn link_user(&self, client_id: Uuid, user_id: Uuid) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET user_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(client_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link user", e))?
        .ok_or_else(|| AppError::not_found(format!("Client {client_id} not found")))
    }

    /// Delete a client record.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete client", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Client {id} not found")));
        }
        Ok(())
    }
}
