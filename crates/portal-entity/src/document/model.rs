//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A document uploaded into the portal.
///
/// `file_path` encodes the client/year/month/category hierarchy as a
/// slash-delimited string and is the source the resolver falls back to
/// when object storage has no physical folder for a path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// The client this document belongs to.
    pub client_id: Uuid,
    /// Full storage path: `client/year/month/category/filename`.
    pub file_path: String,
    /// Original file name (including extension).
    pub filename: String,
    /// Explicit category tag, preferred over path parsing when present.
    pub category: Option<String>,
    /// MIME type of the file.
    pub file_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Return the `file_path` component at the given index, if present.
    ///
    /// Index 0 is the client segment, 1 the year, 2 the month, 3 the
    /// category.
    pub fn path_segment(&self, index: usize) -> Option<&str> {
        self.file_path.split('/').filter(|s| !s.is_empty()).nth(index)
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The owning client.
    pub client_id: Uuid,
    /// Full storage path.
    pub file_path: String,
    /// Original file name.
    pub filename: String,
    /// Explicit category tag.
    pub category: Option<String>,
    /// MIME type.
    pub file_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
}
