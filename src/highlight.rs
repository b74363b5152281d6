//! Marks entity occurrences inside a generated summary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Plain(String),
    Entity(String),
}

impl Segment {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(s) | Segment::Entity(s) => s,
        }
    }
}

/// A summary split into plain runs and entity runs.
///
/// Concatenating every segment gives back the summary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighlightedSummary {
    segments: Vec<Segment>,
}

impl HighlightedSummary {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The undecorated summary.
    #[must_use]
    pub fn plain(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Entity strings that were actually found, in order of appearance.
    #[must_use]
    pub fn highlighted(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Entity(e) => Some(e.as_str()),
                Segment::Plain(_) => None,
            })
            .collect()
    }

    /// Renders entities wrapped in `open`/`close` markers.
    #[must_use]
    pub fn marked(&self, open: &str, close: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain(s) => out.push_str(s),
                Segment::Entity(e) => {
                    out.push_str(open);
                    out.push_str(e);
                    out.push_str(close);
                }
            }
        }
        out
    }

    fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Plain(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Plain(text.to_string()));
        }
    }
}

/// Splits `summary` around occurrences of `key_points`.
///
/// The longest candidate wins at each position and matches never overlap.
/// Empty candidates are ignored.
#[must_use]
pub fn highlight_key_points(summary: &str, key_points: &BTreeSet<String>) -> HighlightedSummary {
    let mut candidates: Vec<&str> = key_points
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut result = HighlightedSummary::default();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < summary.len() {
        let rest = &summary[pos..];
        if let Some(hit) = candidates.iter().find(|c| rest.starts_with(**c)) {
            result.push_plain(&summary[plain_start..pos]);
            result.segments.push(Segment::Entity((*hit).to_string()));
            pos += hit.len();
            plain_start = pos;
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    result.push_plain(&summary[plain_start..]);
    result
}
