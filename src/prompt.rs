//! Summary style presets and prompt construction.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SummarizerError;

/// Input budget handed to the model, in estimated tokens.
pub const MAX_INPUT_TOKENS: usize = 1024;

/// Characters per token assumed by [`estimate_tokens`].
const CHARS_PER_TOKEN: usize = 4;

/// Decoding settings shared by every style.
pub const MIN_LENGTH: u32 = 30;
pub const LENGTH_PENALTY: f32 = 2.0;
pub const NUM_BEAMS: u32 = 4;

/// Width used when flattening HTML newsletters to text.
const HTML_WRAP_WIDTH: usize = 100;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(html|body|head|p|div|br|table|tr|td|span|a|h[1-6]|ul|ol|li|img|strong|em)\b[^>]*>")
        .expect("static regex compile")
});

/// Rough token estimation - assume ~4 characters per token for English-like text.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryStyle {
    #[default]
    Concise,
    Detailed,
    DomainSpecific,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 3] = [
        SummaryStyle::Concise,
        SummaryStyle::Detailed,
        SummaryStyle::DomainSpecific,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::Detailed => "detailed",
            SummaryStyle::DomainSpecific => "domain-specific",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Concise",
            SummaryStyle::Detailed => "Detailed",
            SummaryStyle::DomainSpecific => "Domain-Specific",
        }
    }

    /// Instruction placed in front of the raw newsletter text.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Generate a concise summary: ",
            SummaryStyle::Detailed => "Generate a detailed summary: ",
            SummaryStyle::DomainSpecific => "Generate a summary focusing on key insights: ",
        }
    }

    #[must_use]
    pub fn params(self) -> GenerationParams {
        let (max_length, temperature, repetition_penalty) = match self {
            SummaryStyle::Concise => (80, 1.0, 2.5),
            SummaryStyle::Detailed => (200, 0.7, 1.5),
            SummaryStyle::DomainSpecific => (120, 0.8, 2.0),
        };

        GenerationParams {
            max_length,
            min_length: MIN_LENGTH,
            temperature,
            repetition_penalty,
            length_penalty: LENGTH_PENALTY,
            num_beams: NUM_BEAMS,
            early_stopping: true,
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStyle {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concise" => Ok(SummaryStyle::Concise),
            "detailed" => Ok(SummaryStyle::Detailed),
            "domain-specific" => Ok(SummaryStyle::DomainSpecific),
            other => Err(SummarizerError::InvalidStyle(other.to_string())),
        }
    }
}

/// Decoding hyperparameters attached to a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub temperature: f32,
    pub repetition_penalty: f32,
    pub length_penalty: f32,
    pub num_beams: u32,
    pub early_stopping: bool,
}

impl GenerationParams {
    /// Repetition penalty expressed on the chat-completions frequency scale.
    #[must_use]
    pub fn frequency_penalty(&self) -> f32 {
        (self.repetition_penalty - 1.0).clamp(0.0, 2.0)
    }
}

/// Builds the prompt for `style` and cuts it to [`MAX_INPUT_TOKENS`].
#[must_use]
pub fn build_prompt(style: SummaryStyle, text: &str) -> String {
    let prompt = format!("{}{}", style.prefix(), text);
    truncate_to_tokens(&prompt, MAX_INPUT_TOKENS)
}

/// Keeps at most `max_tokens * 4` characters, cutting on a char boundary.
#[must_use]
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> String {
    let max_chars = max_tokens.saturating_mul(CHARS_PER_TOKEN);
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[must_use]
pub fn looks_like_html(text: &str) -> bool {
    HTML_TAG.is_match(text)
}

/// Trims the input, flattens HTML newsletters to plain text and drops
/// control characters other than line breaks and tabs.
#[must_use]
pub fn normalize_input(text: &str) -> String {
    let trimmed = text.trim();
    let flattened = if looks_like_html(trimmed) {
        match html2text::from_read(trimmed.as_bytes(), HTML_WRAP_WIDTH) {
            Ok(plain) => plain,
            Err(e) => {
                tracing::warn!("Failed to flatten HTML input, using raw text: {}", e);
                trimmed.to_string()
            }
        }
    } else {
        trimmed.to_string()
    };

    flattened
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}
