//! Repository trait for client lookups.

use crate::domain::entities::Client;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to client records in the document store.
///
/// Services are embedded in their client, so a service is resolved by
/// loading the client and calling [`Client::find_service`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClientRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_client.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Finds a client by its document id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, AppError>;

    /// Lists clients ordered by business name.
    ///
    /// # Arguments
    ///
    /// - `only_active` - If true, returns only active clients
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, only_active: bool) -> Result<Vec<Client>, AppError>;

    /// Returns true if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}
