use newsletter_summarizer::core::config::{AppConfig, DEFAULT_API_BASE, TaggerBackend};

#[test]
fn tagger_backend_parses_known_names() {
    assert_eq!("model".parse::<TaggerBackend>(), Ok(TaggerBackend::Model));
    assert_eq!(" Heuristic ".parse::<TaggerBackend>(), Ok(TaggerBackend::Heuristic));
    assert!("spacy".parse::<TaggerBackend>().is_err());
}

#[test]
fn model_name_falls_back_to_default() {
    let mut config = AppConfig {
        openai_api_key: "sk-test".to_string(),
        openai_org_id: None,
        openai_model: None,
        openai_api_base: DEFAULT_API_BASE.to_string(),
        entity_tagger: TaggerBackend::Heuristic,
        request_timeout_secs: 30,
    };
    assert_eq!(config.model_name(), "gpt-4o");

    config.openai_model = Some("  ".to_string());
    assert_eq!(config.model_name(), "gpt-4o");

    config.openai_model = Some("gpt-4o-mini".to_string());
    assert_eq!(config.model_name(), "gpt-4o-mini");
}
