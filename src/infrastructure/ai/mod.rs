//! AI provider clients.

pub mod openai_client;

pub use openai_client::{OpenAiClient, OpenAiConfig};
