//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.

pub mod client_repository;

pub use client_repository::ClientRepository;

#[cfg(test)]
pub use client_repository::MockClientRepository;
