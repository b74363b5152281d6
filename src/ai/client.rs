//! LLM (`OpenAI`) API client module
//!
//! Encapsulates all chat-completions traffic: summary generation and the
//! entity extraction request used for highlighting.

use std::time::Duration;

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::{Client, StatusCode};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use super::model::{GenerationRequest, SummaryModel};
use crate::core::config::{AppConfig, DEFAULT_API_BASE};
use crate::errors::SummarizerError;
use crate::prompt::{GenerationParams, MAX_INPUT_TOKENS, estimate_tokens, truncate_to_tokens};

const MAX_RETRIES: usize = 3;
const ENTITY_MAX_TOKENS: u32 = 400;

const SUMMARIZER_SYSTEM_PROMPT: &str = "You summarise newsletters. \
    Follow the instruction at the start of the user message, which selects the style. \
    Output ONLY the summary text: no preamble, no headings, no markdown.";

const ENTITY_SYSTEM_PROMPT: &str = "You are a named-entity tagger. \
    List every person, organization, location, product and event named in the user's text. \
    Reply with a JSON array of strings and nothing else. \
    Copy each entity exactly as it is written in the text. Reply [] if there are none.";

fn text_message(role: MessageRole, text: String) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Content::Text(text),
        name: None,
        tool_calls: None,
        tool_call_id: None,
    }
}

/// Maps a non-2xx reply to an error; only 429 and 5xx are worth retrying.
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> SummarizerError {
    let message = format!("OpenAI API error (status {status}): {body}");
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        SummarizerError::Unavailable(message)
    } else {
        SummarizerError::ModelError(message)
    }
}

fn send_error(error: reqwest::Error) -> SummarizerError {
    let message = format!("OpenAI API request failed: {error}");
    if error.is_connect() || error.is_timeout() {
        SummarizerError::Unavailable(message)
    } else {
        SummarizerError::HttpError(message)
    }
}

/// Converts chat messages into the JSON shape the chat-completions endpoint expects.
#[must_use]
pub fn messages_to_json(messages: &[ChatCompletionMessage]) -> Vec<Value> {
    messages
        .iter()
        .filter_map(|m| {
            let role = match m.role {
                MessageRole::system => "system",
                MessageRole::assistant => "assistant",
                _ => "user",
            };
            match &m.content {
                Content::Text(text) => Some(json!({ "role": role, "content": text })),
                _ => None,
            }
        })
        .collect()
}

/// Pulls the assistant text out of a chat-completions response.
#[must_use]
pub fn extract_completion_text(response: &Value) -> Option<String> {
    let content = response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))?;

    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// LLM API client for generating summaries
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    api_base: String,
    http: Client,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::HttpError(format!("Failed to build OpenAI HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            org_id,
            model_name,
            api_base: DEFAULT_API_BASE.to_string(),
            http,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        let client = Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.model_name(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(client.with_api_base(&config.openai_api_base))
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    #[must_use]
    pub fn build_prompt(&self, request: &GenerationRequest) -> Vec<ChatCompletionMessage> {
        let system = format!(
            "{SUMMARIZER_SYSTEM_PROMPT} Write at least {} tokens.",
            request.params.min_length
        );
        vec![
            text_message(MessageRole::system, system),
            text_message(MessageRole::user, request.prompt.clone()),
        ]
    }

    #[must_use]
    pub fn build_entity_prompt(&self, text: &str) -> Vec<ChatCompletionMessage> {
        vec![
            text_message(MessageRole::system, ENTITY_SYSTEM_PROMPT.to_string()),
            text_message(
                MessageRole::user,
                truncate_to_tokens(text, MAX_INPUT_TOKENS),
            ),
        ]
    }

    /// Request body for a summary call; decoding settings map onto the
    /// closest chat-completions knobs.
    #[must_use]
    pub fn request_body(
        &self,
        messages: &[ChatCompletionMessage],
        params: &GenerationParams,
    ) -> Value {
        json!({
            "model": self.model_name,
            "messages": messages_to_json(messages),
            "max_tokens": params.max_length,
            "temperature": params.temperature,
            "frequency_penalty": params.frequency_penalty(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, SummarizerError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SummarizerError::ConfigError(format!("Invalid Authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SummarizerError::ConfigError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }

    async fn post_chat(&self, body: &Value) -> Result<String, SummarizerError> {
        let response = self
            .http
            .post(self.endpoint())
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(status_error(status, &error_text));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::ModelError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        extract_completion_text(&response_json)
            .ok_or_else(|| SummarizerError::ModelError("No text in response".to_string()))
    }

    async fn post_with_retry(&self, body: Value) -> Result<String, SummarizerError> {
        // 200ms, 400ms, 800ms before jitter
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(MAX_RETRIES);

        RetryIf::spawn(
            strategy,
            || self.post_chat(&body),
            |e: &SummarizerError| {
                let transient = e.is_transient();
                if transient {
                    warn!("Retrying OpenAI request after transient error: {}", e);
                }
                transient
            },
        )
        .await
    }

    /// Runs the entity-extraction prompt and returns the raw model reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply has no text.
    pub async fn extract_entities_raw(&self, text: &str) -> Result<String, SummarizerError> {
        let messages = self.build_entity_prompt(text);
        let body = json!({
            "model": self.model_name,
            "messages": messages_to_json(&messages),
            "max_tokens": ENTITY_MAX_TOKENS,
            "temperature": 0.0,
        });
        self.post_with_retry(body).await
    }
}

#[async_trait]
impl SummaryModel for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, SummarizerError> {
        let prompt = self.build_prompt(request);

        #[cfg(feature = "debug-logs")]
        info!("Using summary prompt:\n{:?}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(&request.prompt),
            max_length = request.params.max_length,
            "Requesting summary"
        );

        let body = self.request_body(&prompt, &request.params);
        let summary = self.post_with_retry(body).await?;
        debug!("Summary received ({} chars)", summary.chars().count());
        Ok(summary)
    }
}
