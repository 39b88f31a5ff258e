//! Client entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A client record managed by an accountant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client identifier. Doubles as the top-level storage folder name.
    pub id: Uuid,
    /// The accountant who manages this client.
    pub accountant_id: Uuid,
    /// The auth user linked to this client, if portal access was created.
    pub user_id: Option<Uuid>,
    /// Company name, if any.
    pub name: Option<String>,
    /// Contact first name.
    pub first_name: Option<String>,
    /// Contact last name.
    pub last_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Client type (e.g. "individual", "company").
    pub client_type: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Human-readable display name.
    ///
    /// Precedence: company `name`, else `first_name last_name` (trimmed),
    /// else the identifier itself as a fallback of last resort.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }

        self.id.to_string()
    }
}

/// Data required to create a new client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    /// The accountant who owns this client.
    pub accountant_id: Uuid,
    /// Linked auth user, if access was provisioned up front.
    pub user_id: Option<Uuid>,
    /// Company name.
    pub name: Option<String>,
    /// Contact first name.
    pub first_name: Option<String>,
    /// Contact last name.
    pub last_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Client type.
    pub client_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: Option<&str>, first: Option<&str>, last: Option<&str>) -> Client {
        Client {
            id: Uuid::nil(),
            accountant_id: Uuid::nil(),
            user_id: None,
            name: name.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            email: None,
            phone: None,
            client_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_company_name() {
        let c = client(Some("Acme GmbH"), Some("Jane"), Some("Doe"));
        assert_eq!(c.display_name(), "Acme GmbH");
    }

    #[test]
    fn test_display_name_falls_back_to_person_name() {
        assert_eq!(client(None, Some("Jane"), Some("Doe")).display_name(), "Jane Doe");
        assert_eq!(client(None, Some("Jane"), None).display_name(), "Jane");
        assert_eq!(client(Some(""), None, Some("Doe")).display_name(), "Doe");
    }

    #[test]
    fn test_display_name_last_resort_is_id() {
        let c = client(None, None, None);
        assert_eq!(c.display_name(), Uuid::nil().to_string());
    }
}
