//! Client lookup service.

use std::sync::Arc;

use crate::domain::entities::{Client, ClientContext, Service};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;

/// A client resolved for a generation request, optionally narrowed to one service.
#[derive(Debug, Clone)]
pub struct ClientSelection {
    pub client: Client,
    pub service: Option<Service>,
}

impl ClientSelection {
    /// Business description to fall back on: the selected service's, else the client's.
    pub fn business_description(&self) -> Option<&str> {
        self.service
            .as_ref()
            .map(|s| s.description.as_str())
            .filter(|d| !d.trim().is_empty())
            .or(self.client.description.as_deref())
    }

    /// Prompt context for the selection.
    ///
    /// Lists only the selected service when there is one, otherwise every
    /// service the client offers.
    pub fn context(&self) -> ClientContext {
        let services = match &self.service {
            Some(service) => vec![service.clone()],
            None => self.client.services.clone(),
        };

        ClientContext {
            city: self.client.city.clone(),
            website: self.client.website.clone(),
            services,
        }
    }
}

/// Service resolving client and service references from the document store.
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_client(&self, client_id: &str) -> Result<Client, AppError> {
        self.repository
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Resolves a client and, when given, one of its embedded services.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist or does not
    /// offer the requested service.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(
        &self,
        client_id: &str,
        service_id: Option<&str>,
    ) -> Result<ClientSelection, AppError> {
        let client = self.get_client(client_id).await?;

        let service = match service_id {
            Some(id) => Some(
                client
                    .find_service(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found("Service not found"))?,
            ),
            None => None,
        };

        tracing::debug!(
            client_id = %client.id,
            service_id = ?service.as_ref().map(|s| &s.id),
            "Resolved client for generation"
        );

        Ok(ClientSelection { client, service })
    }
}
