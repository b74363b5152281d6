use std::error::Error;
use newsletter_summarizer::errors::SummarizerError;

#[test]
fn test_summarizer_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SummarizerError::InvalidStyle("poetic".to_string());
    assert_error(&error);
}

#[test]
fn test_summarizer_error_display() {
    let error = SummarizerError::EmptyInput;
    assert_eq!(format!("{error}"), "No input text provided");

    let error = SummarizerError::InvalidStyle("poetic".to_string());
    assert_eq!(format!("{error}"), "Invalid summary style selected: poetic");

    let error = SummarizerError::ModelError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access language model: Model unavailable"
    );

    let error = SummarizerError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_summarizer_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let converted: SummarizerError = err.into();
    match converted {
        SummarizerError::ModelError(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let converted: SummarizerError = io.into();
    assert!(matches!(converted, SummarizerError::Io(_)));
    assert!(converted.to_string().contains("read-only"));

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SummarizerError {
        SummarizerError::from(err)
    }
}

#[test]
fn test_transient_errors() {
    assert!(SummarizerError::Unavailable("connection refused".into()).is_transient());
    assert!(!SummarizerError::HttpError("builder error".into()).is_transient());
    assert!(!SummarizerError::ConfigError("Invalid Authorization header: bad".into()).is_transient());
    assert!(!SummarizerError::EmptyInput.is_transient());
}

#[test]
fn test_status_classification() {
    use newsletter_summarizer::ai::client::status_error;
    use reqwest::StatusCode;

    assert!(status_error(StatusCode::TOO_MANY_REQUESTS, "slow down").is_transient());
    assert!(status_error(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
    assert!(status_error(StatusCode::INTERNAL_SERVER_ERROR, "oops").is_transient());

    let err = status_error(StatusCode::UNAUTHORIZED, "bad key");
    assert!(matches!(err, SummarizerError::ModelError(_)));
    assert!(!err.is_transient());

    // a 4xx whose body mentions a 5xx status stays permanent
    let err = status_error(StatusCode::BAD_REQUEST, "upstream said status 503");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_invalid_api_key_is_config_error() {
    use std::time::Duration;

    use newsletter_summarizer::ai::LlmClient;

    let client = LlmClient::new(
        "sk-bad\nkey".to_string(),
        None,
        "gpt-4o".to_string(),
        Duration::from_secs(1),
    )
    .unwrap();
    let err = client.extract_entities_raw("Acme").await.unwrap_err();
    assert!(matches!(err, SummarizerError::ConfigError(_)), "got {err:?}");
    assert!(!err.is_transient());
}
