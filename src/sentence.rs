//! Sentence segmentation for repetition analysis.
//!
//! Cuts the whole corpus into trimmed sentence candidates and discards the
//! short ones. Short fragments ("はい。", "See above.") repeat everywhere and
//! say nothing about duplicated content, so a minimum length filter is what
//! makes the repetition counts meaningful.
//!
//! ## Boundaries
//!
//! Two boundary modes are supported:
//!
//! | Mode | Splits on | Suited for |
//! |------|-----------|------------|
//! | `Terminator(c)` | every occurrence of `c` | Japanese/Chinese prose (`。`) |
//! | `Unicode` | UAX #29 sentence boundaries | space-separated languages |
//!
//! With a terminator the character itself is dropped, exactly like a plain
//! string split. Sentences are compared byte-for-byte after trimming; no
//! punctuation or inner whitespace normalization happens.
//!
//! ```text
//! "前置き。これは三十文字以上ある十分に長い文章の例です。"
//!            ↓ split on '。', trim, keep len >= min_chars
//! ["これは三十文字以上ある十分に長い文章の例です"]   (if min_chars allows)
//! ```

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Where one sentence ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentenceBoundary {
    /// Split on every occurrence of this character.
    Terminator(char),
    /// Unicode Standard Annex #29 sentence boundaries.
    Unicode,
}

impl Default for SentenceBoundary {
    fn default() -> Self {
        Self::Terminator('。')
    }
}

/// Splits text into qualifying sentences.
///
/// ## Example
///
/// ```rust
/// use tomes::{SentenceBoundary, SentenceSegmenter};
///
/// let segmenter = SentenceSegmenter::new(SentenceBoundary::Terminator('.'), 10);
/// let sentences = segmenter.segment("Too short. This one is long enough. Ok.");
///
/// assert_eq!(sentences, vec!["This one is long enough"]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    boundary: SentenceBoundary,
    min_chars: usize,
}

impl SentenceSegmenter {
    /// Create a segmenter.
    ///
    /// # Arguments
    ///
    /// * `boundary` - Where sentences end
    /// * `min_chars` - Minimum trimmed length in characters; 0 keeps every
    ///   non-empty sentence
    #[must_use]
    pub fn new(boundary: SentenceBoundary, min_chars: usize) -> Self {
        Self {
            boundary,
            min_chars,
        }
    }

    /// Build a segmenter from the `[sentence]` configuration table.
    #[must_use]
    pub fn from_config(config: &crate::config::SentenceConfig) -> Self {
        Self::new(config.boundary, config.min_chars)
    }

    /// The configured minimum sentence length.
    #[must_use]
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Segment `text` into trimmed sentences, in order, dropping the short ones.
    ///
    /// Empty input yields an empty vector.
    #[must_use]
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let qualifies = |s: &&str| !s.is_empty() && s.chars().count() >= self.min_chars;

        match self.boundary {
            SentenceBoundary::Terminator(c) => {
                text.split(c).map(str::trim).filter(qualifies).collect()
            }
            SentenceBoundary::Unicode => text
                .split_sentence_bounds()
                .map(str::trim)
                .filter(qualifies)
                .collect(),
        }
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(SentenceBoundary::default(), 30)
    }
}
