//! Local extractive summarization with Latent Semantic Analysis.
//!
//! Sentences are weighted with TF-IDF, projected into a handful of latent
//! topics with a truncated SVD, and ranked by the sum of their normalized
//! topic coordinates. Everything runs on the CPU and is deterministic.

pub mod decomposition;
pub mod stopwords;
pub mod tfidf;

pub use decomposition::project_topics;
pub use stopwords::StopwordFilter;
pub use tfidf::{TfidfMatrix, TfidfVectorizer, l2_normalize};

use crate::{
    config::LsaConfig,
    text::{SentenceSegmenter, UnicodeSentenceSegmenter},
};

/// Why a chunk could not be ranked. Always recovered by the summarizer.
#[derive(Debug, thiserror::Error)]
pub enum LsaError {
    #[error("empty vocabulary: sentences contain only stop words")]
    EmptyVocabulary,
    #[error("no terms remain after document-frequency pruning")]
    NoTermsRemain,
    #[error("no latent topics can be extracted")]
    NoComponents,
    #[error("singular value decomposition failed")]
    DecompositionFailed,
}

#[derive(Debug, Clone)]
pub struct LsaSummarizer<S = UnicodeSentenceSegmenter> {
    config: LsaConfig,
    vectorizer: TfidfVectorizer,
    segmenter: S,
}

impl LsaSummarizer {
    pub fn new(config: LsaConfig) -> Self {
        Self::with_segmenter(config, UnicodeSentenceSegmenter)
    }
}

impl Default for LsaSummarizer {
    fn default() -> Self {
        Self::new(LsaConfig::default())
    }
}

impl<S: SentenceSegmenter> LsaSummarizer<S> {
    pub fn with_segmenter(config: LsaConfig, segmenter: S) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(&config, StopwordFilter::english()),
            config,
            segmenter,
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.vectorizer = TfidfVectorizer::new(&self.config, stopwords);
        self
    }

    pub fn config(&self) -> &LsaConfig {
        &self.config
    }

    /// Keep the `num_sentences` most salient sentences, in original order.
    ///
    /// Text with no more sentences than requested comes back unchanged. When
    /// the chunk cannot be ranked, the leading sentences are used instead.
    pub fn summarize_chunk(&self, text: &str, num_sentences: usize) -> String {
        let sentences = self.segmenter.segment(text);
        if sentences.len() <= num_sentences {
            return text.to_string();
        }

        let selected = match self.select(&sentences, num_sentences) {
            Ok(indices) => indices,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    sentences = sentences.len(),
                    "LSA ranking failed, keeping leading sentences"
                );
                (0..num_sentences).collect()
            }
        };

        selected
            .into_iter()
            .map(|idx| sentences[idx])
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Salience of each sentence: sum of its L2-normalized topic coordinates.
    pub fn score_sentences(&self, sentences: &[&str]) -> Result<Vec<f64>, LsaError> {
        let matrix = self.vectorizer.fit_transform(sentences)?;
        let projected = project_topics(&matrix, self.config.num_topics)?;

        Ok(projected
            .into_iter()
            .map(|mut topics| {
                l2_normalize(&mut topics);
                topics.iter().sum()
            })
            .collect())
    }

    /// Indices of the top `count` sentences, sorted by position.
    fn select(&self, sentences: &[&str], count: usize) -> Result<Vec<usize>, LsaError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let scores = self.score_sentences(sentences)?;

        let mut ranked: Vec<usize> = (0..scores.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        ranked.truncate(count);
        ranked.sort_unstable();

        Ok(ranked)
    }
}
