use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncReadExt};

use crate::{
    error::{KratkoError, Result},
    text::normalize_whitespace,
    types::{CaptionEntry, SegmentedTranscript, Transcript},
};

/// Where a transcript comes from.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Tag reported back to callers alongside the summary.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Transcript>;
}

/// Transcript stored on disk as plain text or speech-to-text JSON.
#[derive(Debug, Clone)]
pub struct FileTranscriptSource {
    path: PathBuf,
}

impl FileTranscriptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<Transcript> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| unavailable(self.name(), format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "transcript file read");

        let text = parse_transcript(&content).map_err(|reason| unavailable(self.name(), reason))?;
        finish(text, self.name())
    }
}

/// Transcript piped in on standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinTranscriptSource;

#[async_trait]
impl TranscriptSource for StdinTranscriptSource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    async fn fetch(&self) -> Result<Transcript> {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .map_err(|e| unavailable(self.name(), e.to_string()))?;

        let text = parse_transcript(&content).map_err(|reason| unavailable(self.name(), reason))?;
        finish(text, self.name())
    }
}

/// Transcript text handed over directly, e.g. in a request body.
#[derive(Debug, Clone)]
pub struct InlineTranscriptSource {
    text: String,
}

impl InlineTranscriptSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TranscriptSource for InlineTranscriptSource {
    fn name(&self) -> &'static str {
        "inline"
    }

    async fn fetch(&self) -> Result<Transcript> {
        finish(self.text.clone(), self.name())
    }
}

/// Accepts plain text, a Whisper-style JSON document or a caption list.
///
/// Anything that does not start like JSON is taken as plain text.
pub fn parse_transcript(content: &str) -> std::result::Result<String, String> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let captions: Vec<CaptionEntry> =
            serde_json::from_str(trimmed).map_err(|e| format!("invalid caption list: {e}"))?;
        return Ok(join_texts(captions.iter().map(|c| c.text.as_str())));
    }
    if trimmed.starts_with('{') {
        let segmented: SegmentedTranscript =
            serde_json::from_str(trimmed).map_err(|e| format!("invalid transcript JSON: {e}"))?;
        if segmented.segments.is_empty() {
            return Ok(segmented.text);
        }
        return Ok(join_texts(segmented.segments.iter().map(|s| s.text.as_str())));
    }
    Ok(content.to_string())
}

fn join_texts<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    texts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn finish(text: String, source: &str) -> Result<Transcript> {
    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(unavailable(source, "transcript is empty".to_string()));
    }
    Ok(Transcript {
        text,
        source: source.to_string(),
    })
}

fn unavailable(source: &str, reason: String) -> KratkoError {
    KratkoError::TranscriptUnavailable {
        source_name: source.to_string(),
        reason,
    }
}
