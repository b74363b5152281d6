use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("No input text provided")]
    EmptyInput,

    #[error("Invalid summary style selected: {0}")]
    InvalidStyle(String),

    #[error("Failed to access language model: {0}")]
    ModelError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    /// Rate limiting, a 5xx reply, or a connection that never completed.
    #[error("Language model temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to tag entities: {0}")]
    EntityError(String),

    #[error("Failed to export document: {0}")]
    ExportError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SummarizerError {
    /// Whether a retry of the same request could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, SummarizerError::Unavailable(_))
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            SummarizerError::Unavailable(error.to_string())
        } else {
            SummarizerError::HttpError(error.to_string())
        }
    }
}

impl From<anyhow::Error> for SummarizerError {
    fn from(error: anyhow::Error) -> Self {
        SummarizerError::ModelError(error.to_string())
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(error: serde_json::Error) -> Self {
        SummarizerError::ModelError(format!("Malformed JSON: {error}"))
    }
}

pub type Result<T, E = SummarizerError> = std::result::Result<T, E>;
