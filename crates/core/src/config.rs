use std::time::Duration;

use crate::types::SummaryLength;

/// One value per [`SummaryLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTable<T> {
    pub short: T,
    pub medium: T,
    pub long: T,
}

impl<T: Copy> LengthTable<T> {
    pub const fn new(short: T, medium: T, long: T) -> Self {
        Self {
            short,
            medium,
            long,
        }
    }

    pub fn get(&self, length: SummaryLength) -> T {
        match length {
            SummaryLength::Short => self.short,
            SummaryLength::Medium => self.medium,
            SummaryLength::Long => self.long,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Approximate words per chunk.
    pub chunk_size: usize,
    /// Maximum words carried over from the previous chunk.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LsaConfig {
    pub num_topics: usize,
    /// Terms present in more than this fraction of sentences are dropped.
    pub max_df: f64,
    /// Terms must appear in at least this many sentences.
    pub min_df: usize,
}

impl Default for LsaConfig {
    fn default() -> Self {
        Self {
            num_topics: 3,
            max_df: 0.9,
            min_df: 1,
        }
    }
}

/// Retry and timeout policy of the remote summarizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemotePolicy {
    /// Inputs longer than this are cut before sending.
    pub max_input_words: usize,
    pub max_retries: usize,
    pub default_loading_wait: Duration,
    pub rate_limit_wait: Duration,
    pub transport_retry_wait: Duration,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for RemotePolicy {
    fn default() -> Self {
        Self {
            max_input_words: 700,
            max_retries: 5,
            default_loading_wait: Duration::from_secs(20),
            rate_limit_wait: Duration::from_secs(10),
            transport_retry_wait: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Transcripts with fewer words go straight to the remote model.
    pub short_path_threshold: usize,
    pub short_path_max_length: LengthTable<usize>,
    pub sentences_per_chunk: LengthTable<usize>,
    pub long_path_max_length: LengthTable<usize>,
    /// Sentence budget of the LSA fallback is `max_length / this`.
    pub fallback_words_per_sentence: usize,
    pub chunking: ChunkingConfig,
    pub lsa: LsaConfig,
    pub remote: RemotePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            short_path_threshold: 500,
            short_path_max_length: LengthTable::new(100, 130, 150),
            sentences_per_chunk: LengthTable::new(2, 3, 4),
            long_path_max_length: LengthTable::new(100, 150, 200),
            fallback_words_per_sentence: 15,
            chunking: ChunkingConfig::default(),
            lsa: LsaConfig::default(),
            remote: RemotePolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn fallback_sentences(&self, max_length: usize) -> usize {
        max_length / self.fallback_words_per_sentence.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_length_profiles() {
        let cfg = PipelineConfig::default();

        assert_eq!(cfg.short_path_max_length.get(SummaryLength::Medium), 130);
        assert_eq!(cfg.sentences_per_chunk.get(SummaryLength::Long), 4);
        assert_eq!(cfg.long_path_max_length.get(SummaryLength::Short), 100);
    }

    #[test]
    fn fallback_budget_uses_integer_division() {
        let cfg = PipelineConfig::default();

        assert_eq!(cfg.fallback_sentences(100), 6);
        assert_eq!(cfg.fallback_sentences(150), 10);
        assert_eq!(cfg.fallback_sentences(200), 13);
    }
}
