//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`ai`] - OpenAI-compatible chat-completion client
//! - [`persistence`] - PostgreSQL repository implementations

pub mod ai;
pub mod persistence;
