//! State behind the summarizer window and the actions its buttons trigger.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{error, info};

use crate::ai::{EntityTagger, SummaryModel};
use crate::core::models::{Notice, SummaryLength};
use crate::errors::SummarizerError;
use crate::features::export::{
    DOCX_EXTENSION, TEXT_EXTENSION, default_file_name, ensure_extension, export_docx, save_text,
};
use crate::features::summarize::summarize_text;
use crate::highlight::HighlightedSummary;
use crate::prompt::SummaryStyle;

pub const STATUS_READY: &str = "Ready to generate summary.";
pub const STATUS_GENERATING: &str = "Generating summary... Please wait.";
pub const STATUS_DONE: &str = "Summary generated successfully!";
pub const STATUS_FAILED: &str = "Failed to generate summary.";

/// Where a save action writes and how it reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    SummaryText,
    SummaryDocx,
    Feedback,
}

impl SaveTarget {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            SaveTarget::SummaryText | SaveTarget::Feedback => TEXT_EXTENSION,
            SaveTarget::SummaryDocx => DOCX_EXTENSION,
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            SaveTarget::SummaryText | SaveTarget::SummaryDocx => "summary",
            SaveTarget::Feedback => "feedback",
        }
    }

    fn empty_notice(self) -> Notice {
        match self {
            SaveTarget::SummaryText => Notice::warning("Save Error", "No summary to save."),
            SaveTarget::SummaryDocx => Notice::warning("Export Error", "No summary to export."),
            SaveTarget::Feedback => Notice::warning("Feedback Error", "No feedback to save."),
        }
    }

    fn done_notice(self, path: &Path) -> Notice {
        let shown = path.display();
        match self {
            SaveTarget::SummaryText => Notice::info("Saved", format!("Summary saved to {shown}")),
            SaveTarget::SummaryDocx => {
                Notice::info("Exported", format!("Summary exported to {shown}"))
            }
            SaveTarget::Feedback => Notice::info("Saved", format!("Feedback saved to {shown}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub input: String,
    pub output: String,
    pub feedback: String,
    pub status: String,
    pub length: SummaryLength,
    pub style: SummaryStyle,
    entities: BTreeSet<String>,
    generating: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            feedback: String::new(),
            status: STATUS_READY.to_string(),
            length: SummaryLength::default(),
            style: SummaryStyle::default(),
            entities: BTreeSet::new(),
            generating: false,
        }
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Entities highlighted in the current summary.
    #[must_use]
    pub fn entities(&self) -> &BTreeSet<String> {
        &self.entities
    }

    /// Validates the input and marks a generation as running.
    ///
    /// Returns the text to summarize, or the warning to show when there is none.
    pub fn begin_generation(&mut self) -> Result<String, Notice> {
        let text = self.input.trim();
        if text.is_empty() {
            return Err(Notice::warning("Input Error", "Please enter some text."));
        }
        self.generating = true;
        self.status = STATUS_GENERATING.to_string();
        info!(
            style = %self.style,
            length = self.length.characters(),
            "Starting summary generation"
        );
        Ok(text.to_string())
    }

    /// Applies a finished generation. Every failure becomes one generic error notice.
    pub fn finish_generation(
        &mut self,
        result: Result<HighlightedSummary, SummarizerError>,
    ) -> Option<Notice> {
        self.generating = false;
        match result {
            Ok(summary) => {
                self.output = summary.plain();
                self.entities = summary.highlighted().into_iter().map(str::to_string).collect();
                self.status = STATUS_DONE.to_string();
                None
            }
            Err(e) => {
                error!("Error during summarization: {}", e);
                self.status = STATUS_FAILED.to_string();
                Some(Notice::error("Error", format!("Failed to generate summary: {e}")))
            }
        }
    }

    /// Runs the whole generate action with the selected style.
    pub async fn generate(
        &mut self,
        model: &dyn SummaryModel,
        tagger: &dyn EntityTagger,
    ) -> Option<Notice> {
        let style = self.style.as_str();
        self.generate_with_style(model, tagger, style).await
    }

    /// Runs the generate action with a style given by label; unknown labels
    /// fail through the same generic error notice as model failures.
    pub async fn generate_with_style(
        &mut self,
        model: &dyn SummaryModel,
        tagger: &dyn EntityTagger,
        style_label: &str,
    ) -> Option<Notice> {
        let text = match self.begin_generation() {
            Ok(text) => text,
            Err(notice) => return Some(notice),
        };
        let result = summarize_text(model, tagger, &text, style_label).await;
        self.finish_generation(result)
    }

    fn content_for(&self, target: SaveTarget) -> &str {
        match target {
            SaveTarget::SummaryText | SaveTarget::SummaryDocx => self.output.trim(),
            SaveTarget::Feedback => self.feedback.trim(),
        }
    }

    /// Checks there is something to write and proposes a file name.
    pub fn prepare_save(&self, target: SaveTarget) -> Result<String, Notice> {
        if self.content_for(target).is_empty() {
            return Err(target.empty_notice());
        }
        Ok(default_file_name(target.file_stem(), target.extension()))
    }

    /// Writes the content for `target` to `path`.
    pub fn save(&self, target: SaveTarget, path: &Path) -> Notice {
        let content = self.content_for(target);
        if content.is_empty() {
            return target.empty_notice();
        }

        let path = ensure_extension(path, target.extension());
        let written = match target {
            SaveTarget::SummaryDocx => export_docx(&path, content),
            SaveTarget::SummaryText | SaveTarget::Feedback => save_text(&path, content),
        };

        match written {
            Ok(()) => target.done_notice(&path),
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                Notice::error("Save Error", format!("Could not write {}: {e}", path.display()))
            }
        }
    }

    pub fn save_summary(&self, path: &Path) -> Notice {
        self.save(SaveTarget::SummaryText, path)
    }

    pub fn export_summary(&self, path: &Path) -> Notice {
        self.save(SaveTarget::SummaryDocx, path)
    }

    pub fn save_feedback(&self, path: &Path) -> Notice {
        self.save(SaveTarget::Feedback, path)
    }

    #[must_use]
    pub fn share(&self) -> Notice {
        Notice::info("Share Feature", "Share functionality is not implemented.")
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.feedback.clear();
        self.entities.clear();
        self.status = STATUS_READY.to_string();
    }
}
