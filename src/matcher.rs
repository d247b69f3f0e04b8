//! Pattern matching capability.
//!
//! The extractor and analyzer only need two questions answered about a piece
//! of text: does it match, and where. Keeping that behind a trait means the
//! regular expression engine is an implementation detail:
//!
//! ```text
//! Matcher
//! ├── PatternMatcher   regex, case-insensitive (key phrases, heading labels)
//! └── LiteralMatcher   any of a fixed set of words (case-study markers)
//! ```
//!
//! [`HeadingMatcher`] is built on top: it recognizes `#`-style heading lines
//! and delegates the heading text to an inner [`Matcher`].

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

/// Something that can find occurrences of a pattern in text.
///
/// ```rust
/// use tomes::{LiteralMatcher, Matcher};
///
/// fn count(matcher: &dyn Matcher, text: &str) -> usize {
///     matcher.count(text)
/// }
///
/// let markers = LiteralMatcher::new(["case", "example"]);
/// assert_eq!(count(&markers, "a case, another case, an example"), 3);
/// ```
pub trait Matcher: Send + Sync {
    /// Whether `text` contains at least one match.
    fn matches(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }

    /// Byte spans of all non-overlapping matches, leftmost first.
    fn find_all(&self, text: &str) -> Vec<Range<usize>>;

    /// Number of non-overlapping matches.
    fn count(&self, text: &str) -> usize {
        self.find_all(text).len()
    }
}

/// Case-insensitive regular expression.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    source: String,
    regex: Regex,
}

impl PatternMatcher {
    /// Compile `pattern` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }

    fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// Matches any of a fixed set of literal words.
///
/// At each position the earliest listed word that matches wins, and scanning
/// resumes after it, so overlapping words are not double counted.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    words: Vec<String>,
}

impl LiteralMatcher {
    /// Create a matcher over `words`. Empty words are ignored.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// The words being matched.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Matcher for LiteralMatcher {
    fn matches(&self, text: &str) -> bool {
        self.words.iter().any(|w| text.contains(w.as_str()))
    }

    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            match self.words.iter().find(|w| rest.starts_with(w.as_str())) {
                Some(word) => {
                    spans.push(pos..pos + word.len());
                    pos += word.len();
                }
                None => {
                    // Advance one character; `rest` is non-empty here
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        spans
    }
}

/// Recognizes heading lines and tests their text.
///
/// A heading line is one to six `#` characters followed by whitespace (or
/// nothing). The text after the markers is trimmed and handed to the inner
/// matcher. An optional depth restricts matches to one heading level.
///
/// ```rust
/// use tomes::{HeadingMatcher, PatternMatcher};
///
/// let matcher = HeadingMatcher::new(PatternMatcher::new("summary").unwrap(), Some(2));
///
/// assert_eq!(matcher.match_line("## Chapter 3 Summary"), Some(2));
/// assert_eq!(matcher.match_line("### Summary"), None);
/// assert_eq!(matcher.match_line("Summary"), None);
/// ```
pub struct HeadingMatcher {
    text: Box<dyn Matcher>,
    depth: Option<usize>,
}

impl HeadingMatcher {
    /// Create a heading matcher.
    ///
    /// # Arguments
    ///
    /// * `text` - Tested against the heading text after the `#` markers
    /// * `depth` - Required number of `#` markers, or `None` for any
    #[must_use]
    pub fn new(text: impl Matcher + 'static, depth: Option<usize>) -> Self {
        Self {
            text: Box::new(text),
            depth,
        }
    }

    /// Build the summary heading matcher from the `[summary]` table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the label does not compile.
    pub fn from_config(config: &crate::config::SummaryConfig) -> Result<Self> {
        Ok(Self::new(PatternMatcher::new(&config.label)?, config.depth))
    }

    /// If `line` is a matching heading, return its depth.
    #[must_use]
    pub fn match_line(&self, line: &str) -> Option<usize> {
        let depth = heading_depth(line)?;
        if self.depth.is_some_and(|d| d != depth) {
            return None;
        }
        let text = line[depth..].trim();
        self.text.matches(text).then_some(depth)
    }
}

impl std::fmt::Debug for HeadingMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingMatcher")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// Depth of a `#`-style heading line, or `None` if `line` is not a heading.
///
/// ```rust
/// use tomes::heading_depth;
///
/// assert_eq!(heading_depth("# Title"), Some(1));
/// assert_eq!(heading_depth("### Deep\n"), Some(3));
/// assert_eq!(heading_depth("#hashtag"), None);
/// assert_eq!(heading_depth("####### seven"), None);
/// ```
#[must_use]
pub fn heading_depth(line: &str) -> Option<usize> {
    let line = line.trim_end_matches(['\n', '\r']);
    let depth = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&depth) {
        return None;
    }
    match line[depth..].chars().next() {
        None | Some(' ') | Some('\t') => Some(depth),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_case_insensitive() {
        let matcher = PatternMatcher::new("growth.*hormone").unwrap();
        assert_eq!(matcher.count("Growth HORMONE and growth of hormone"), 1);
        assert!(matcher.matches("GROWTH hormone"));
    }

    #[test]
    fn test_pattern_spans() {
        let matcher = PatternMatcher::new("骨端線").unwrap();
        let text = "a骨端線b骨端線";
        let spans = matcher.find_all(text);

        assert_eq!(spans.len(), 2);
        for span in spans {
            assert_eq!(&text[span], "骨端線");
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternMatcher::new("(unclosed");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_literal_non_overlapping() {
        let matcher = LiteralMatcher::new(["実際", "実例"]);
        assert_eq!(matcher.count("実際に実例を見る。実際"), 3);
        assert_eq!(matcher.count("何もない"), 0);
    }

    #[test]
    fn test_literal_first_listed_wins() {
        let matcher = LiteralMatcher::new(["ab", "abc"]);
        let spans = matcher.find_all("abc");
        assert_eq!(spans, vec![0..2]);
    }

    #[test]
    fn test_literal_ignores_empty_words() {
        let matcher = LiteralMatcher::new(["", "x"]);
        assert_eq!(matcher.words().len(), 1);
        assert_eq!(matcher.count("xx"), 2);
    }

    #[test]
    fn test_heading_depth() {
        assert_eq!(heading_depth("## まとめ"), Some(2));
        assert_eq!(heading_depth("#"), Some(1));
        assert_eq!(heading_depth("no heading"), None);
        assert_eq!(heading_depth(" # indented"), None);
    }

    #[test]
    fn test_heading_matcher_any_depth() {
        let matcher = HeadingMatcher::new(PatternMatcher::new("まとめ").unwrap(), None);
        assert_eq!(matcher.match_line("### 第3章のまとめ"), Some(3));
        assert_eq!(matcher.match_line("まとめ"), None);
    }

    #[test]
    fn test_heading_matcher_from_default_config() {
        let config = crate::config::SummaryConfig::default();
        let matcher = HeadingMatcher::from_config(&config).unwrap();

        assert_eq!(matcher.match_line("## 第12章のまとめ"), Some(2));
        assert_eq!(matcher.match_line("## まとめ：重要ポイント"), Some(2));
        assert_eq!(matcher.match_line("## はじめに"), None);
        assert_eq!(matcher.match_line("# まとめ"), None);
    }
}
