#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use newsletter_summarizer::SummarizerError;
use newsletter_summarizer::ai::{EntityTagger, GenerationRequest, SummaryModel};

/// Records every request and answers with a fixed summary.
pub struct RecordingModel {
    pub requests: Mutex<Vec<GenerationRequest>>,
    reply: Result<String, String>,
}

impl RecordingModel {
    pub fn replying(summary: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(summary.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("model was not called")
    }
}

#[async_trait]
impl SummaryModel for RecordingModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, SummarizerError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(SummarizerError::ModelError)
    }
}

/// Returns a fixed entity set and counts calls.
pub struct FixedTagger {
    entities: BTreeSet<String>,
    pub calls: AtomicUsize,
}

impl FixedTagger {
    pub fn new(entities: &[&str]) -> Self {
        Self {
            entities: entities.iter().map(|s| (*s).to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityTagger for FixedTagger {
    async fn entities(&self, _text: &str) -> Result<BTreeSet<String>, SummarizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entities.clone())
    }
}
