use crate::{
    config::ChunkingConfig,
    text::{SentenceSegmenter, UnicodeSentenceSegmenter, word_count},
};

/// Splits long text into overlapping, sentence-aligned chunks.
#[derive(Debug, Clone)]
pub struct TextChunker<S = UnicodeSentenceSegmenter> {
    config: ChunkingConfig,
    segmenter: S,
}

impl TextChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self::with_segmenter(config, UnicodeSentenceSegmenter)
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

impl<S: SentenceSegmenter> TextChunker<S> {
    pub fn with_segmenter(config: ChunkingConfig, segmenter: S) -> Self {
        Self { config, segmenter }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Greedily packs sentences into chunks of about `chunk_size` words.
    ///
    /// Each new chunk starts with the longest suffix of the previous one that
    /// fits in `overlap` words. A sentence is never split, so one sentence
    /// longer than `chunk_size` becomes an oversized chunk of its own.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let sentences = self.segmenter.segment(text);
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_words = 0;

        for sentence in sentences {
            let sentence_words = word_count(sentence);

            if current_words + sentence_words > self.config.chunk_size && !current.is_empty() {
                chunks.push(current.join(" "));

                current = self.overlap_tail(&current);
                current_words = current.iter().map(|s| word_count(s)).sum();
            }

            current.push(sentence);
            current_words += sentence_words;
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        tracing::debug!(
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size,
            overlap = self.config.overlap,
            "text chunked"
        );

        chunks
    }

    /// Trailing sentences of a closed chunk whose total stays within `overlap`.
    fn overlap_tail<'a>(&self, sentences: &[&'a str]) -> Vec<&'a str> {
        let mut words = 0;
        let mut start = sentences.len();

        for (idx, sentence) in sentences.iter().enumerate().rev() {
            let sentence_words = word_count(sentence);
            if words + sentence_words > self.config.overlap {
                break;
            }
            words += sentence_words;
            start = idx;
        }

        sentences[start..].to_vec()
    }
}
