/// Newsletter Summarizer - paste a newsletter, get a styled summary back.
///
/// The crate wires a small, linear pipeline:
/// 1. A style preset picks the instruction prefix and decoding parameters
/// 2. A language model (`OpenAI` chat completions) writes the summary
/// 3. An entity tagger picks names from the input that get highlighted in the summary
/// 4. The result can be saved as plain text or exported as a `.docx` document
///
/// # Architecture
///
/// The system uses:
/// - reqwest + openai-api-rs for the model calls, with tokio-retry backoff
/// - docx-rs for document export
/// - eframe/egui for the desktop window (feature `gui`)
/// - clap for the headless command-line front end
///
/// # Example
///
/// ```no_run
/// use newsletter_summarizer::ai::{CapitalizedSpanTagger, LlmClient};
/// use newsletter_summarizer::core::config::AppConfig;
/// use newsletter_summarizer::session::Session;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     newsletter_summarizer::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let client = LlmClient::from_config(&config)?;
///
///     let mut session = Session::new();
///     session.input = "Acme Corp announced a new CEO this week...".to_string();
///     if let Some(notice) = session.generate(&client, &CapitalizedSpanTagger).await {
///         eprintln!("{}: {}", notice.title, notice.message);
///     }
///     println!("{}", session.output);
///     Ok(())
/// }
/// ```
pub mod ai;
pub mod core;
pub mod errors;
pub mod features;
#[cfg(feature = "gui")]
pub mod gui;
pub mod highlight;
pub mod prompt;
pub mod session;

pub use errors::SummarizerError;
pub use prompt::estimate_tokens;

use std::sync::Arc;

use crate::ai::{CapitalizedSpanTagger, EntityTagger, LlmClient, ModelEntityTagger};
use crate::core::config::{AppConfig, TaggerBackend};

/// Configure console logging at INFO level.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// newsletter_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .try_init();
}

/// Builds the model client and the configured entity tagger.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_backends(
    config: &AppConfig,
) -> Result<(Arc<LlmClient>, Arc<dyn EntityTagger>), SummarizerError> {
    let client = Arc::new(LlmClient::from_config(config)?);
    let tagger: Arc<dyn EntityTagger> = match config.entity_tagger {
        TaggerBackend::Model => Arc::new(ModelEntityTagger::new(Arc::clone(&client))),
        TaggerBackend::Heuristic => Arc::new(CapitalizedSpanTagger),
    };
    Ok((client, tagger))
}
