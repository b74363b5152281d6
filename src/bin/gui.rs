// Desktop entry point: opens the summarizer window.

use std::process::ExitCode;

use newsletter_summarizer::core::config::AppConfig;
use newsletter_summarizer::{build_backends, gui};
use tracing::{error, info};

fn main() -> ExitCode {
    newsletter_summarizer::setup_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (client, tagger) = match build_backends(&config) {
        Ok(backends) => backends,
        Err(e) => {
            error!("Failed to initialize model client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Using model {} with {:?} entity tagger",
        client.model_name(),
        config.entity_tagger
    );

    if let Err(e) = gui::run(client, tagger) {
        error!("Window error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
