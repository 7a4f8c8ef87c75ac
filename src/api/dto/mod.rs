//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod generate;
pub mod health;

pub use generate::{ClientDataDto, GenerateAdsRequest, ServiceDto};
