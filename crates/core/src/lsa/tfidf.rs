use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::{config::LsaConfig, lsa::LsaError, lsa::stopwords::StopwordFilter};

/// Sentence-by-term weight matrix, rows L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries.
    pub data: Vec<f64>,
    /// Column terms in alphabetical order.
    pub vocabulary: Vec<String>,
}

impl TfidfMatrix {
    pub fn row(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.cols..(idx + 1) * self.cols]
    }
}

/// Term-frequency / inverse-document-frequency weighting where every
/// sentence is one document.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_df: f64,
    min_df: usize,
    stopwords: StopwordFilter,
}

impl TfidfVectorizer {
    pub fn new(config: &LsaConfig, stopwords: StopwordFilter) -> Self {
        Self {
            max_df: config.max_df,
            min_df: config.min_df,
            stopwords,
        }
    }

    /// Lowercased runs of two or more word characters, stop words removed.
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        sentence
            .to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stopwords.is_stopword(token))
            .map(str::to_string)
            .collect()
    }

    pub fn fit_transform(&self, sentences: &[&str]) -> Result<TfidfMatrix, LsaError> {
        let n_docs = sentences.len();
        let counts: Vec<FxHashMap<String, usize>> = sentences
            .iter()
            .map(|sentence| {
                let mut tf = FxHashMap::default();
                for token in self.tokenize(sentence) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(LsaError::EmptyVocabulary);
        }

        let max_doc_count = self.max_df * n_docs as f64;
        let kept: Vec<(&str, usize)> = doc_freq
            .into_iter()
            .filter(|&(_, df)| df >= self.min_df && df as f64 <= max_doc_count)
            .collect();
        if kept.is_empty() {
            return Err(LsaError::NoTermsRemain);
        }

        let cols = kept.len();
        let mut data = vec![0.0; n_docs * cols];
        for (row, tf) in counts.iter().enumerate() {
            let cells = &mut data[row * cols..(row + 1) * cols];
            for (col, &(term, df)) in kept.iter().enumerate() {
                if let Some(&count) = tf.get(term) {
                    let idf = ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0;
                    cells[col] = count as f64 * idf;
                }
            }
            l2_normalize(cells);
        }

        Ok(TfidfMatrix {
            rows: n_docs,
            cols,
            data,
            vocabulary: kept.into_iter().map(|(term, _)| term.to_string()).collect(),
        })
    }
}

/// Scale `values` to unit length; an all-zero slice is left untouched.
pub fn l2_normalize(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in values.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(&LsaConfig::default(), StopwordFilter::english())
    }

    #[test]
    fn tokenizer_drops_stopwords_and_single_chars() {
        let tokens = vectorizer().tokenize("The Borrow-checker is a lifetime, x y z!");
        assert_eq!(tokens, vec!["borrow", "checker", "lifetime"]);
    }

    #[test]
    fn rows_are_unit_length() {
        let matrix = vectorizer()
            .fit_transform(&[
                "Rust compiles quickly.",
                "Tokio schedules tasks.",
                "Rust schedules nothing.",
            ])
            .unwrap();

        for row in 0..matrix.rows {
            let norm: f64 = matrix.row(row).iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn terms_in_almost_every_sentence_are_pruned() {
        let matrix = vectorizer()
            .fit_transform(&[
                "Rust memory safety.",
                "Rust fearless concurrency.",
                "Rust zero cost abstractions.",
            ])
            .unwrap();

        assert!(!matrix.vocabulary.contains(&"rust".to_string()));
        assert!(matrix.vocabulary.contains(&"memory".to_string()));
    }

    #[test]
    fn vocabulary_is_sorted() {
        let matrix = vectorizer()
            .fit_transform(&["Zebra apple.", "Mango kiwi."])
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["apple", "kiwi", "mango", "zebra"]);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let matrix = vectorizer()
            .fit_transform(&[
                "Async runtime rocks.",
                "Async executor rocks.",
                "Different topic entirely here.",
            ])
            .unwrap();

        let col = |term: &str| matrix.vocabulary.iter().position(|t| t == term).unwrap();
        let row = matrix.row(0);
        assert!(row[col("runtime")] > row[col("async")]);
    }

    #[test]
    fn stopword_only_input_has_empty_vocabulary() {
        let err = vectorizer()
            .fit_transform(&["It is what it is.", "And so on."])
            .unwrap_err();
        assert!(matches!(err, LsaError::EmptyVocabulary));
    }

    #[test]
    fn shared_terms_only_leave_nothing() {
        let err = vectorizer()
            .fit_transform(&["Rust.", "Rust!", "Rust?"])
            .unwrap_err();
        assert!(matches!(err, LsaError::NoTermsRemain));
    }
}
