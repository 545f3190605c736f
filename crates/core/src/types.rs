use std::fmt;

use serde::{Deserialize, Serialize};

/// Requested summary size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transcript text handed to the pipeline, already whitespace-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Tag reported back to callers, e.g. "file" or "inline".
    pub source: String,
}

/// Whisper-style transcript, as written by speech-to-text tools.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentedTranscript {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    pub text: String,
}

/// Caption entry as returned by transcript APIs (`text`, `start`, `duration`).
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePath {
    /// Transcript summarized directly by the remote model.
    Short,
    /// Chunked, compressed with LSA, then summarized remotely.
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub original_length: usize,
    pub summary_length: usize,
    pub chunks_processed: usize,
    pub lsa_intermediate_length: usize,
    pub api_calls_made: usize,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    pub path: PipelinePath,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub summary: String,
    pub metadata: PipelineMetadata,
}

/// Payload returned to callers of the CLI and the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub transcript_source: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub chunks_processed: usize,
    pub lsa_intermediate_length: usize,
    pub api_calls_made: usize,
    pub processing_time: f64,
    pub used_fallback: bool,
}

impl SummarizeResponse {
    pub fn new(output: PipelineOutput, transcript_source: impl Into<String>) -> Self {
        let PipelineOutput { summary, metadata } = output;
        Self {
            summary,
            transcript_source: transcript_source.into(),
            original_length: metadata.original_length,
            summary_length: metadata.summary_length,
            chunks_processed: metadata.chunks_processed,
            lsa_intermediate_length: metadata.lsa_intermediate_length,
            api_calls_made: metadata.api_calls_made,
            processing_time: metadata.processing_time,
            used_fallback: metadata.used_fallback,
        }
    }
}
