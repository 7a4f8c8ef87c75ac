//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgClientRepository`] - Client document lookups

pub mod pg_client_repository;

pub use pg_client_repository::PgClientRepository;
