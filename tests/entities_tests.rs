use newsletter_summarizer::ai::CapitalizedSpanTagger;
use newsletter_summarizer::ai::entities::parse_entity_list;
use newsletter_summarizer::errors::SummarizerError;

const SOURCE: &str = "Acme Corp hired Jane Doe. The Bank of England kept rates steady in London.";

#[test]
fn parses_plain_json_array() {
    let entities = parse_entity_list(r#"["Acme Corp", "Jane Doe"]"#, SOURCE).unwrap();
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Acme Corp", "Jane Doe"]);
}

#[test]
fn parses_fenced_reply_and_drops_invented_names() {
    let raw = "Here you go:\n```json\n[\"London\", \"Paris\", \"\", 42, \" Jane Doe \"]\n```";
    let entities = parse_entity_list(raw, SOURCE).unwrap();
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Jane Doe", "London"]);
}

#[test]
fn rejects_reply_without_array() {
    let err = parse_entity_list("No entities found.", SOURCE).unwrap_err();
    assert!(matches!(err, SummarizerError::EntityError(_)));

    let err = parse_entity_list("[not json]", SOURCE).unwrap_err();
    assert!(matches!(err, SummarizerError::EntityError(_)));
}

#[test]
fn parses_array_after_bracketed_prose() {
    let raw = "Entities [JSON]:\n[\"Acme Corp\", \"Jane Doe\"]\nLet me know [if] you need more.";
    let entities = parse_entity_list(raw, SOURCE).unwrap();
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Acme Corp", "Jane Doe"]);
}

#[test]
fn empty_array_means_no_entities() {
    assert!(parse_entity_list("[]", SOURCE).unwrap().is_empty());
}

#[test]
fn heuristic_tagger_finds_capitalized_runs() {
    let entities = CapitalizedSpanTagger.tag(SOURCE);
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["Acme Corp", "Bank of England", "Jane Doe", "London"]
    );
}

#[test]
fn heuristic_tagger_skips_sentence_openers() {
    let entities = CapitalizedSpanTagger.tag("This week was quiet. It rained.");
    assert!(entities.is_empty(), "unexpected entities: {entities:?}");
}

#[test]
fn heuristic_tagger_splits_on_punctuation() {
    let entities = CapitalizedSpanTagger.tag("We opened offices in Paris, Berlin and Tokyo.");
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Berlin", "Paris", "Tokyo"]);
}

#[test]
fn heuristic_tagger_drops_trailing_connector() {
    let entities = CapitalizedSpanTagger.tag("They thanked Acme of course.");
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Acme"]);
}

#[test]
fn heuristic_tagger_skips_lone_sentence_initial_words() {
    let entities = CapitalizedSpanTagger.tag("Markets were calm. Analysts expect growth!");
    assert!(entities.is_empty(), "unexpected entities: {entities:?}");
}

#[test]
fn heuristic_tagger_keeps_sentence_initial_name_seen_elsewhere() {
    let entities =
        CapitalizedSpanTagger.tag("Acme rallied on Monday. Investors cheered Acme again.");
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Acme", "Monday"]);
}
