//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Client`] - A client business record with embedded [`Service`]s
//! - [`GenerationRequest`] - A validated ad copy generation request
//! - [`RawAdCopy`] - Unchecked candidates returned by the model
//! - [`GenerationResponse`] - Compliance-checked copy returned to callers

pub mod ad_copy;
pub mod client;
pub mod generation;

pub use ad_copy::{DEFAULT_CONFIDENCE, GenerationResponse, RawAdCopy};
pub use client::{Client, Service, ServiceCategory};
pub use generation::{CampaignTarget, ClientContext, GenerationRequest, Objective, Tone};
