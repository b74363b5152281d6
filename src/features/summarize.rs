use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::ai::{EntityTagger, GenerationRequest, SummaryModel};
use crate::errors::SummarizerError;
use crate::highlight::{HighlightedSummary, highlight_key_points};
use crate::prompt::{SummaryStyle, normalize_input};

/// Generate a highlighted summary of `input` in the style named by `style_label`.
///
/// One model call produces the summary; one tagger call over the input picks
/// the entities that get highlighted in it.
///
/// # Errors
///
/// Fails on empty input, an unknown style label, or any model/tagger error.
pub async fn summarize_text(
    model: &dyn SummaryModel,
    tagger: &dyn EntityTagger,
    input: &str,
    style_label: &str,
) -> Result<HighlightedSummary, SummarizerError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("summarize", %request_id, style = style_label);

    async move {
        let text = normalize_input(input);
        if text.is_empty() {
            return Err(SummarizerError::EmptyInput);
        }

        let style: SummaryStyle = style_label.parse()?;
        let request = GenerationRequest::for_style(style, &text);
        info!(
            "Generating {} summary from {} input chars",
            style,
            text.chars().count()
        );

        let summary = model.generate(&request).await?;
        let entities = tagger.entities(&text).await?;
        let highlighted = highlight_key_points(&summary, &entities);

        info!(
            "Summary ready: {} chars, {} of {} entities highlighted",
            summary.chars().count(),
            highlighted.highlighted().len(),
            entities.len()
        );
        Ok(highlighted)
    }
    .instrument(span)
    .await
}
