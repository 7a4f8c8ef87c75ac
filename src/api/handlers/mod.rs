//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod generate;
pub mod health;

pub use generate::{generate_facebook_handler, generate_google_handler};
pub use health::health_handler;
