//! Domain layer containing business entities and logic.
//!
//! Everything here is independent of HTTP, the database, and the AI
//! provider. The two pieces of real logic are pure functions:
//!
//! - [`prompt_builder::build_prompts`] renders the model instructions
//! - [`compliance::validate`] enforces platform rules on the model output
//!
//! # Modules
//!
//! - [`entities`] - Core data structures
//! - [`platform`] - Platforms and their static limits table
//! - [`completion`] - AI provider capability (trait + errors)
//! - [`repositories`] - Data access trait definitions

pub mod completion;
pub mod compliance;
pub mod entities;
pub mod platform;
pub mod prompt_builder;
pub mod repositories;
