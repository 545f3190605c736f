use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences. Chunking and LSA ranking both work on its output.
pub trait SentenceSegmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// UAX #29 sentence boundaries: breaks after `.`, `!`, `?` (never on commas).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every whitespace run into a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `limit` words of `text`, or `None` when it already fits.
pub fn truncate_words(text: &str, limit: usize) -> Option<String> {
    if word_count(text) <= limit {
        return None;
    }
    Some(
        text.split_whitespace()
            .take(limit)
            .collect::<Vec<_>>()
            .join(" "),
    )
}
