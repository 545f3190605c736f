use std::{sync::Arc, time::Instant};

use tracing::Instrument;
use uuid::Uuid;

use crate::{
    chunker::TextChunker,
    config::PipelineConfig,
    error::{KratkoError, Result},
    lsa::LsaSummarizer,
    remote::AbstractiveSummarizer,
    types::{PipelineMetadata, PipelineOutput, PipelinePath, SummaryLength},
    text::word_count,
};

/// Hybrid summarizer: short transcripts go straight to the remote model,
/// long ones are compressed locally with LSA first.
pub struct SummarizationPipeline<A> {
    config: PipelineConfig,
    chunker: TextChunker,
    lsa: Arc<LsaSummarizer>,
    remote: A,
}

impl<A: AbstractiveSummarizer> SummarizationPipeline<A> {
    pub fn new(config: PipelineConfig, remote: A) -> Self {
        Self {
            chunker: TextChunker::new(config.chunking),
            lsa: Arc::new(LsaSummarizer::new(config.lsa)),
            config,
            remote,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn remote(&self) -> &A {
        &self.remote
    }

    pub async fn run(&self, transcript: &str, length: SummaryLength) -> Result<PipelineOutput> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", %run_id, %length);
        self.run_inner(transcript, length).instrument(span).await
    }

    async fn run_inner(&self, transcript: &str, length: SummaryLength) -> Result<PipelineOutput> {
        let started = Instant::now();
        let original_length = word_count(transcript);
        if original_length == 0 {
            return Err(KratkoError::EmptyTranscript);
        }

        let (summary, path, chunks_processed, lsa_intermediate_length, used_fallback) =
            if original_length < self.config.short_path_threshold {
                tracing::info!(words = original_length, "short transcript, direct remote summary");
                let summary = self.summarize_short(transcript, length).await?;
                (summary, PipelinePath::Short, 0, 0, false)
            } else {
                tracing::info!(words = original_length, "long transcript, hybrid LSA + remote summary");
                let long = self.summarize_long(transcript, length).await?;
                (
                    long.summary,
                    PipelinePath::Long,
                    long.chunks_processed,
                    long.intermediate_length,
                    long.used_fallback,
                )
            };

        let processing_time = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        let metadata = PipelineMetadata {
            original_length,
            summary_length: word_count(&summary),
            chunks_processed,
            lsa_intermediate_length,
            api_calls_made: 1,
            processing_time,
            path,
            used_fallback,
        };
        tracing::info!(
            summary_words = metadata.summary_length,
            processing_time,
            used_fallback,
            "pipeline complete"
        );

        Ok(PipelineOutput { summary, metadata })
    }

    async fn summarize_short(&self, transcript: &str, length: SummaryLength) -> Result<String> {
        let max_length = self.config.short_path_max_length.get(length);
        self.remote
            .summarize(transcript, max_length, max_length / 2)
            .await
    }

    async fn summarize_long(&self, transcript: &str, length: SummaryLength) -> Result<LongPath> {
        let chunks = self.chunker.chunk_text(transcript);
        let chunks_processed = chunks.len();
        tracing::info!(chunks = chunks_processed, "transcript chunked");

        let sentences_per_chunk = self.config.sentences_per_chunk.get(length);
        let lsa = Arc::clone(&self.lsa);
        let intermediate = tokio::task::spawn_blocking(move || {
            chunks
                .iter()
                .map(|chunk| lsa.summarize_chunk(chunk, sentences_per_chunk))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .await?;
        let intermediate_length = word_count(&intermediate);
        tracing::debug!(words = intermediate_length, "LSA intermediate summary ready");

        let max_length = self.config.long_path_max_length.get(length);
        let (summary, used_fallback) = match self
            .remote
            .summarize(&intermediate, max_length, max_length / 2)
            .await
        {
            Ok(summary) => (summary, false),
            Err(e) => {
                tracing::warn!(error = %e, "remote summary failed, using LSA fallback");
                let budget = self.config.fallback_sentences(max_length);
                let lsa = Arc::clone(&self.lsa);
                let summary =
                    tokio::task::spawn_blocking(move || lsa.summarize_chunk(&intermediate, budget))
                        .await?;
                (summary, true)
            }
        };

        Ok(LongPath {
            summary,
            chunks_processed,
            intermediate_length,
            used_fallback,
        })
    }
}

struct LongPath {
    summary: String,
    chunks_processed: usize,
    intermediate_length: usize,
    used_fallback: bool,
}
