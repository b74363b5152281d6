//! Named-entity tagging used to pick highlight candidates.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::LlmClient;
use crate::errors::SummarizerError;

/// Words that join capitalized words inside one name ("Bank of England").
const CONNECTORS: &[&str] = &["of", "&", "de", "for", "the"];

/// Capitalized words that usually just open a sentence.
const SENTENCE_OPENERS: &[&str] = &[
    "A", "An", "And", "As", "At", "But", "By", "For", "From", "He", "Her", "His", "How", "I",
    "If", "In", "It", "Its", "My", "No", "Not", "Of", "On", "Or", "Our", "She", "So", "That",
    "The", "Their", "There", "These", "They", "This", "Those", "To", "We", "What", "When",
    "Where", "Which", "While", "Who", "Why", "With", "You", "Your",
];

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}&][\p{L}\p{N}&'’.\-]*").expect("static regex compile"));

#[async_trait]
pub trait EntityTagger: Send + Sync {
    /// Distinct entity strings found in `text`.
    async fn entities(&self, text: &str) -> Result<BTreeSet<String>, SummarizerError>;
}

/// Asks the language model for the entity list.
pub struct ModelEntityTagger {
    client: Arc<LlmClient>,
}

impl ModelEntityTagger {
    #[must_use]
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityTagger for ModelEntityTagger {
    async fn entities(&self, text: &str) -> Result<BTreeSet<String>, SummarizerError> {
        let raw = self.client.extract_entities_raw(text).await?;
        let entities = parse_entity_list(&raw, text)?;
        debug!("Model tagged {} entities", entities.len());
        Ok(entities)
    }
}

/// Parses a model reply holding a JSON array of strings.
///
/// Accepts the array wrapped in a code fence or surrounded by prose, and
/// drops anything that does not occur verbatim in `source`.
///
/// # Errors
///
/// Returns [`SummarizerError::EntityError`] when no JSON array can be found.
pub fn parse_entity_list(raw: &str, source: &str) -> Result<BTreeSet<String>, SummarizerError> {
    // prose may carry its own brackets; take the first `[` that opens a valid array
    let items = raw
        .match_indices('[')
        .find_map(|(i, _)| {
            serde_json::Deserializer::from_str(&raw[i..])
                .into_iter::<Vec<Value>>()
                .next()
                .and_then(Result::ok)
        })
        .ok_or_else(|| {
            SummarizerError::EntityError(format!(
                "Expected a JSON array of entities, got: {}",
                raw.chars().take(80).collect::<String>()
            ))
        })?;

    let mut entities = BTreeSet::new();
    for item in &items {
        let Some(name) = item.as_str().map(str::trim) else {
            warn!("Skipping non-string entity: {}", item);
            continue;
        };
        if !name.is_empty() && source.contains(name) {
            entities.insert(name.to_string());
        }
    }
    Ok(entities)
}

/// Offline tagger: maximal runs of capitalized words.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizedSpanTagger;

impl CapitalizedSpanTagger {
    /// A lone capitalized word that opens a sentence is only kept when the
    /// same word is also capitalized somewhere mid-sentence.
    #[must_use]
    pub fn tag(&self, text: &str) -> BTreeSet<String> {
        let mut runs = Vec::new();
        let mut run: Option<Run> = None;
        // capitalized words seen away from a sentence start
        let mut mid_sentence = HashSet::new();
        // connector seen after the current run; held until a capital follows
        let mut pending_connector = false;
        let mut sentence_start = true;
        let mut last_end = 0;

        for m in WORD.find_iter(text) {
            let word = m.as_str().trim_end_matches(['.', '\'', '’', '-']);
            let gap = &text[last_end..m.start()];
            last_end = m.end();
            let breaks_run = gap.chars().any(|c| !c.is_whitespace());
            let opens_sentence = sentence_start || gap.contains(['.', '!', '?']);

            if breaks_run {
                flush(&mut run, &mut runs);
                pending_connector = false;
            }

            if is_capitalized(word) {
                if !opens_sentence {
                    mid_sentence.insert(word);
                }
                let end = m.start() + word.len();
                run = match run {
                    // "The Bank": drop the opener, keep the name
                    Some(r) if r.words == 1 && SENTENCE_OPENERS.contains(&&text[r.start..r.end]) => {
                        Some(Run::new(m.start(), end, false))
                    }
                    Some(r) => Some(Run {
                        end,
                        words: r.words + 1,
                        ..r
                    }),
                    None => Some(Run::new(m.start(), end, opens_sentence)),
                };
                pending_connector = false;
            } else if run.is_some() && !pending_connector && CONNECTORS.contains(&word) {
                pending_connector = true;
            } else {
                flush(&mut run, &mut runs);
                pending_connector = false;
            }

            sentence_start = m.as_str().ends_with('.') && word.len() > 1;
            if sentence_start {
                flush(&mut run, &mut runs);
                pending_connector = false;
            }
        }
        flush(&mut run, &mut runs);

        runs
            .into_iter()
            .filter_map(|r| {
                let span = &text[r.start..r.end];
                if r.words > 1 {
                    return Some(span.to_string());
                }
                if SENTENCE_OPENERS.contains(&span) {
                    return None;
                }
                (!r.opens_sentence || mid_sentence.contains(span)).then(|| span.to_string())
            })
            .collect()
    }
}

/// Byte span of a run of capitalized words.
#[derive(Debug, Clone, Copy)]
struct Run {
    start: usize,
    end: usize,
    words: usize,
    opens_sentence: bool,
}

impl Run {
    fn new(start: usize, end: usize, opens_sentence: bool) -> Self {
        Self {
            start,
            end,
            words: 1,
            opens_sentence,
        }
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn flush(run: &mut Option<Run>, out: &mut Vec<Run>) {
    if let Some(r) = run.take() {
        out.push(r);
    }
}

#[async_trait]
impl EntityTagger for CapitalizedSpanTagger {
    async fn entities(&self, text: &str) -> Result<BTreeSet<String>, SummarizerError> {
        Ok(self.tag(text))
    }
}
