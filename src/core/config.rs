use std::env;
use std::str::FromStr;

use openai_api_rs::v1::common::GPT4_O;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which backend picks highlight candidates out of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaggerBackend {
    #[default]
    Model,
    Heuristic,
}

impl FromStr for TaggerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" => Ok(TaggerBackend::Model),
            "heuristic" => Ok(TaggerBackend::Heuristic),
            other => Err(format!("unknown entity tagger backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub openai_api_base: String,
    pub entity_tagger: TaggerBackend,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let entity_tagger = match env::var("SUMMARIZER_ENTITY_TAGGER") {
            Ok(value) => value
                .parse()
                .map_err(|e| format!("SUMMARIZER_ENTITY_TAGGER: {}", e))?,
            Err(_) => TaggerBackend::default(),
        };

        let request_timeout_secs = match env::var("SUMMARIZER_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| format!("SUMMARIZER_TIMEOUT_SECS: {}", e))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            entity_tagger,
            request_timeout_secs,
        })
    }

    #[must_use]
    pub fn model_name(&self) -> String {
        self.openai_model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GPT4_O.to_string())
    }
}
