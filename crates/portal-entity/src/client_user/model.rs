//! Link table between auth users and client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maps an auth user to the client record they may act for.
///
/// A client-role caller is pinned to the subtree of this client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientUser {
    /// The auth user.
    pub user_id: Uuid,
    /// The client record the user belongs to.
    pub client_id: Uuid,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}
