use axum::{Json, extract::State};
use kratko_core::{
    InlineTranscriptSource, SummarizeResponse, SummaryLength, TranscriptSource,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    state::{AppState, SummaryBackend},
};

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub transcript: String,
    #[serde(default)]
    pub summary_length: SummaryLength,
}

#[tracing::instrument(skip(state, request), fields(length = %request.summary_length))]
pub async fn summarize_handler<B>(
    State(state): State<AppState<B>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError>
where
    B: SummaryBackend + 'static,
{
    let transcript = InlineTranscriptSource::new(request.transcript).fetch().await?;
    let output = state
        .pipeline
        .run(&transcript.text, request.summary_length)
        .await?;

    tracing::info!(
        original_words = output.metadata.original_length,
        summary_words = output.metadata.summary_length,
        used_fallback = output.metadata.used_fallback,
        "Summary produced"
    );
    Ok(Json(SummarizeResponse::new(output, transcript.source)))
}
