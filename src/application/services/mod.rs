//! Business logic services for the application layer.

pub mod client_service;
pub mod generation_service;

pub use client_service::{ClientSelection, ClientService};
pub use generation_service::GenerationService;
