//! Client display-name cache.

use dashmap::DashMap;
use uuid::Uuid;

use portal_core::result::AppResult;
use portal_entity::client::model::Client;

use super::index::HierarchyIndex;

/// Cache of client display names, keyed by client id.
///
/// Warmed in bulk at the root listing and extended one client at a time
/// when a path references a client the cache has not seen. Entries are
/// never evicted; a repeated `put` on the same key wins.
#[derive(Debug, Default)]
pub struct ClientNames {
    map: DashMap<Uuid, String>,
}

impl ClientNames {
    /// The cached display name for a client, if known.
    pub fn get(&self, id: &Uuid) -> Option<String> {
        self.map.get(id).map(|entry| entry.clone())
    }

    /// Insert or replace the display name for a client.
    pub fn put(&self, id: Uuid, name: String) {
        self.map.insert(id, name);
    }

    /// Whether the cache has an entry for this client.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.map.contains_key(id)
    }

    /// Bulk-insert display names for a set of clients.
    pub fn warm(&self, clients: &[Client]) {
        for client in clients {
            self.put(client.id, client.display_name());
        }
    }

    /// Make sure one client's name is cached, fetching it on a miss.
    /// Unknown client ids are left uncached; the raw id renders instead.
    pub async fn ensure(&self, index: &dyn HierarchyIndex, id: Uuid) -> AppResult<()> {
        if self.contains(&id) {
            return Ok(());
        }
        if let Some(client) = index.find_client(id).await? {
            self.put(client.id, client.display_name());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn client(id: Uuid, name: &str) -> Client {
        Client {
            id,
            accountant_id: Uuid::nil(),
            user_id: None,
            name: Some(name.to_string()),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            client_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_warm_and_get() {
        let names = ClientNames::default();
        let id = Uuid::new_v4();
        names.warm(&[client(id, "Acme GmbH")]);
        assert_eq!(names.get(&id), Some("Acme GmbH".to_string()));
    }

    #[test]
    fn test_last_write_wins() {
        let names = ClientNames::default();
        let id = Uuid::new_v4();
        names.put(id, "Old".to_string());
        names.put(id, "New".to_string());
        assert_eq!(names.get(&id), Some("New".to_string()));
    }
}
