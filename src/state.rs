//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ClientService, GenerationService};
use crate::domain::completion::CompletionClient;
use crate::domain::repositories::ClientRepository;

/// Capabilities shared by all handlers.
///
/// The AI client and client store are injected here rather than reached
/// through globals, so tests can swap either for an in-memory stand-in.
#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub client_service: Arc<ClientService>,
    pub client_repository: Arc<dyn ClientRepository>,
    pub completion_client: Arc<dyn CompletionClient>,
}

impl AppState {
    /// Wires services on top of the given capabilities.
    pub fn new(
        client_repository: Arc<dyn ClientRepository>,
        completion_client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            generation_service: Arc::new(GenerationService::new(completion_client.clone())),
            client_service: Arc::new(ClientService::new(client_repository.clone())),
            client_repository,
            completion_client,
        }
    }
}
