use newsletter_summarizer::errors::SummarizerError;
use newsletter_summarizer::prompt::{
    MAX_INPUT_TOKENS, SummaryStyle, build_prompt, estimate_tokens, looks_like_html,
    normalize_input, truncate_to_tokens,
};

#[test]
fn test_estimate_tokens() {
    assert_eq!(estimate_tokens(""), 1);
    assert_eq!(estimate_tokens("hello"), 2);
}

#[test]
fn test_style_parameter_tuples() {
    let concise = SummaryStyle::Concise.params();
    assert_eq!(concise.max_length, 80);
    assert!((concise.temperature - 1.0).abs() < f32::EPSILON);
    assert!((concise.repetition_penalty - 2.5).abs() < f32::EPSILON);

    let detailed = SummaryStyle::Detailed.params();
    assert_eq!(detailed.max_length, 200);
    assert!((detailed.temperature - 0.7).abs() < f32::EPSILON);
    assert!((detailed.repetition_penalty - 1.5).abs() < f32::EPSILON);

    let domain = SummaryStyle::DomainSpecific.params();
    assert_eq!(domain.max_length, 120);
    assert!((domain.temperature - 0.8).abs() < f32::EPSILON);
    assert!((domain.repetition_penalty - 2.0).abs() < f32::EPSILON);

    for style in SummaryStyle::ALL {
        let p = style.params();
        assert_eq!(p.min_length, 30);
        assert_eq!(p.num_beams, 4);
        assert!((p.length_penalty - 2.0).abs() < f32::EPSILON);
        assert!(p.early_stopping);
    }
}

#[test]
fn test_style_labels_round_trip_through_parse() {
    for style in SummaryStyle::ALL {
        assert_eq!(style.as_str().parse::<SummaryStyle>().unwrap(), style);
    }
    assert_eq!(
        " Domain-Specific ".parse::<SummaryStyle>().unwrap(),
        SummaryStyle::DomainSpecific
    );
}

#[test]
fn test_unknown_style_is_rejected() {
    let err = "poetic".parse::<SummaryStyle>().unwrap_err();
    assert!(matches!(err, SummarizerError::InvalidStyle(ref s) if s == "poetic"));
}

#[test]
fn test_build_prompt_prefixes() {
    assert_eq!(
        build_prompt(SummaryStyle::Concise, "Body"),
        "Generate a concise summary: Body"
    );
    assert_eq!(
        build_prompt(SummaryStyle::Detailed, "Body"),
        "Generate a detailed summary: Body"
    );
    assert_eq!(
        build_prompt(SummaryStyle::DomainSpecific, "Body"),
        "Generate a summary focusing on key insights: Body"
    );
}

#[test]
fn test_build_prompt_truncates_to_budget() {
    let long = "word ".repeat(5_000);
    let prompt = build_prompt(SummaryStyle::Concise, &long);
    assert_eq!(prompt.chars().count(), MAX_INPUT_TOKENS * 4);
    assert!(prompt.starts_with("Generate a concise summary: "));
}

#[test]
fn test_truncate_respects_char_boundaries() {
    let text = "é".repeat(10);
    let cut = truncate_to_tokens(&text, 1);
    assert_eq!(cut, "éééé");
    assert_eq!(truncate_to_tokens("short", 10), "short");
}

#[test]
fn test_normalize_plain_text() {
    assert_eq!(normalize_input("  Hello\tworld\u{0000}\n  "), "Hello\tworld");
    assert!(!looks_like_html("Revenue grew 5% < expectations"));
}

#[test]
fn test_normalize_html_newsletter() {
    let html = "<html><body><h1>Weekly</h1><p>Acme Corp launched <strong>Widget</strong>.</p></body></html>";
    assert!(looks_like_html(html));

    let text = normalize_input(html);
    assert!(!text.contains("<p>"));
    assert!(text.contains("Weekly"));
    assert!(text.contains("Acme Corp launched"));
    assert!(text.contains("Widget"));
}

#[test]
fn test_frequency_penalty_mapping() {
    assert!((SummaryStyle::Concise.params().frequency_penalty() - 1.5).abs() < f32::EPSILON);
    assert!((SummaryStyle::Detailed.params().frequency_penalty() - 0.5).abs() < f32::EPSILON);
    assert!((SummaryStyle::DomainSpecific.params().frequency_penalty() - 1.0).abs() < f32::EPSILON);
}
