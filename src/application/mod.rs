//! Application layer services implementing business logic.
//!
//! Services consume the domain's capability traits and provide a clean API
//! for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::client_service::ClientService`] - Client and service resolution
//! - [`services::generation_service::GenerationService`] - Prompting, AI call, compliance checks

pub mod services;
