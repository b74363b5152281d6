use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::SummarizerError;
use crate::prompt::{GenerationParams, SummaryStyle, build_prompt};

/// One call to the summary model: the full prompt plus decoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

impl GenerationRequest {
    #[must_use]
    pub fn for_style(style: SummaryStyle, text: &str) -> Self {
        Self {
            prompt: build_prompt(style, text),
            params: style.params(),
        }
    }
}

/// Anything that turns a prompt into summary text.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, SummarizerError>;
}
