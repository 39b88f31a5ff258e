//! Client management service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_database::repositories::{ClientRepository, ClientUserRepository};
use portal_entity::client::model::{Client, CreateClient};

use crate::hierarchy::names::ClientNames;

/// Manages client records and portal access links.
#[derive(Debug, Clone)]
pub struct ClientService {
    clients: ClientRepository,
    links: ClientUserRepository,
    names: Arc<ClientNames>,
}

impl ClientService {
    /// Create a client service.
    pub fn new(
        clients: ClientRepository,
        links: ClientUserRepository,
        names: Arc<ClientNames>,
    ) -> Self {
        Self { clients, links, names }
    }

    /// List the clients managed by one accountant.
    pub async fn list(&self, accountant_id: Uuid) -> AppResult<Vec<Client>> {
        self.clients.find_by_accountant(accountant_id).await
    }

    /// Fetch one client.
    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Client {id} not found")))
    }

    /// Create a client record. The record must carry at least one name
    /// component, otherwise nothing could ever label its folder. A missing
    /// company name is filled from the contact name.
    pub async fn create(&self, mut request: CreateClient) -> AppResult<Client> {
        if request.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            let contact = [request.first_name.as_deref(), request.last_name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if contact.is_empty() {
                return Err(AppError::validation(
                    "Client requires a company name or a first/last name",
                ));
            }
            request.name = Some(contact);
        }

        let client = self.clients.create(&request).await?;
        self.names.put(client.id, client.display_name());
        info!(client_id = %client.id, "Created client");
        Ok(client)
    }

    /// Update a client record and refresh its cached display name.
    pub async fn update(&self, client: &Client) -> AppResult<Client> {
        let updated = self.clients.update(client).await?;
        self.names.put(updated.id, updated.display_name());
        info!(client_id = %updated.id, "Updated client");
        Ok(updated)
    }

    /// Delete a client record and its documents.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.clients.delete(id).await?;
        info!(client_id = %id, "Deleted client");
        Ok(())
    }

    /// Grant a portal user access to a client's subtree.
    pub async fn grant_access(&self, client_id: Uuid, user_id: Uuid) -> AppResult<Client> {
        self.links.link(user_id, client_id).await?;
        let client = self.clients.link_user(client_id, user_id).await?;
        info!(client_id = %client_id, user_id = %user_id, "Granted portal access");
        Ok(client)
    }

    /// The client a portal user is allowed to act for, if any.
    pub async fn client_for_user(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
        self.links.find_client_id_by_user(user_id).await
    }
}
