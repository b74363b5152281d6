//! All AI/LLM functionality

pub mod client;
pub mod entities;
pub mod model;

pub use client::LlmClient;
pub use entities::{CapitalizedSpanTagger, EntityTagger, ModelEntityTagger};
pub use model::{GenerationRequest, SummaryModel};
