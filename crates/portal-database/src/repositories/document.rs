//! Document repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::document::model::{CreateDocument, Document};

/// Repository for document metadata.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// Insert a new document record.
    pub async fn create(&self, document: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (id, client_id, file_path, filename, category, file_type, \
             size_bytes, uploaded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW()) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(document.client_id)
        .bind(&document.file_path)
        .bind(&document.filename)
        .bind(&document.category)
        .bind(&document.file_type)
        .bind(document.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// All documents for one client.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE client_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Documents for one client whose `file_path` starts with the prefix.
    pub async fn find_by_client_and_prefix(
        &self,
        client_id: Uuid,
        prefix: &str,
    ) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE client_id = $1 AND file_path LIKE $2 \
             ORDER BY uploaded_at DESC",
        )
        .bind(client_id)
        .bind(format!("{}%", escape_like(prefix)))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// The most recently uploaded documents across one accountant's clients.
    pub async fn find_recent(&self, accountant_id: Uuid, limit: i64) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT d.* FROM documents d \
             JOIN clients c ON c.id = d.client_id \
             WHERE c.accountant_id = $1 \
             ORDER BY d.uploaded_at DESC LIMIT $2",
        )
        .bind(accountant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list recent documents", e)
        })
    }

    /// Delete a document record.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        Ok(())
    }
}

/// Escape LIKE wildcards in a user-derived prefix.
fn escape_like(prefix: &str) -> String {
    prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("c1/2023"), "c1/2023");
        assert_eq!(escape_like("a_b%c"), "a\\_b\\%c");
    }
}
