//! Configuration for analysis and simplification.
//!
//! Every threshold and word list the analyzer and simplifier use lives here,
//! passed in at construction time. The defaults reproduce the editorial
//! conventions of a Japanese-language book with `## まとめ` summary sections:
//!
//! ```text
//! sentence.min_chars            30    shorter sentences are not repetition candidates
//! repetition.min_count           3    report sentences seen at least this often
//! summary.skip_below           500    shorter summary bodies are left alone
//! summary.bullet_max_chars     200    longer bullets are dropped
//! summary.fallback_max_lines    10    cap for summaries with no bullets
//! case_study.threshold          20    report chapters with more markers than this
//! ```
//!
//! ## Loading From TOML
//!
//! Every table is optional and every field defaults, so a file only names
//! what it changes:
//!
//! ```rust
//! use tomes::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [summary]
//!     skip_below = 300
//!
//!     [case_study]
//!     threshold = 5
//! "#).unwrap();
//!
//! assert_eq!(config.summary.skip_below, 300);
//! assert_eq!(config.summary.bullet_max_chars, 200);
//! assert_eq!(config.case_study.threshold, 5);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::sentence::SentenceBoundary;
use crate::{Error, Result};

/// Complete configuration surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered chapter file names to simplify. Empty means every chapter
    /// file in the directory, in file-name order.
    pub chapters: Vec<String>,
    /// Sentence segmentation.
    pub sentence: SentenceConfig,
    /// Repeated-sentence reporting.
    pub repetition: RepetitionConfig,
    /// Summary section detection and retention rules.
    pub summary: SummaryConfig,
    /// Key phrases tracked across the corpus.
    pub key_phrases: KeyPhraseConfig,
    /// Case-study density.
    pub case_study: CaseStudyConfig,
    /// Presentation limits.
    pub report: ReportConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML and
    /// [`Error::InvalidSetting`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check the constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.repetition.min_count == 0 {
            return Err(invalid("repetition.min_count", "must be > 0"));
        }
        if self.summary.label.trim().is_empty() {
            return Err(invalid("summary.label", "must not be empty"));
        }
        if let Some(depth) = self.summary.depth {
            if !(1..=6).contains(&depth) {
                return Err(invalid(
                    "summary.depth",
                    format!("{depth} is not a heading depth (1..=6)"),
                ));
            }
        }
        if self.summary.bullet_max_chars == 0 {
            return Err(invalid("summary.bullet_max_chars", "must be > 0"));
        }
        if self.case_study.markers.iter().any(|m| m.is_empty()) {
            return Err(invalid("case_study.markers", "markers must not be empty"));
        }
        Ok(())
    }

    /// Replace the chapter list.
    #[must_use]
    pub fn with_chapters<I, S>(mut self, chapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chapters = chapters.into_iter().map(Into::into).collect();
        self
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidSetting {
        field,
        reason: reason.into(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chapters: Vec::new(),
            sentence: SentenceConfig::default(),
            repetition: RepetitionConfig::default(),
            summary: SummaryConfig::default(),
            key_phrases: KeyPhraseConfig::default(),
            case_study: CaseStudyConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// How the corpus is cut into sentences.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SentenceConfig {
    /// Where sentences end.
    pub boundary: SentenceBoundary,
    /// Minimum trimmed length, in characters, for a sentence to count.
    pub min_chars: usize,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            boundary: SentenceBoundary::Terminator('。'),
            min_chars: 30,
        }
    }
}

/// Repeated-sentence reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepetitionConfig {
    /// Minimum occurrences for a sentence to be reported.
    pub min_count: usize,
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self { min_count: 3 }
    }
}

/// Summary section detection and the retention rules applied to its body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Regex searched for in the heading text (after the `#` markers).
    pub label: String,
    /// Required heading depth, or `None` to accept any depth.
    pub depth: Option<usize>,
    /// Bodies shorter than this many characters are never rewritten.
    pub skip_below: usize,
    /// Bullet lines must be strictly shorter than this to survive.
    pub bullet_max_chars: usize,
    /// Line cap when no line qualifies as emphasis or bullet.
    pub fallback_max_lines: usize,
    /// Lines containing any of these are treated as motivational prose.
    pub encouragement_keywords: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            label: r"(?:第\d+章の)?まとめ".to_string(),
            depth: Some(2),
            skip_below: 500,
            bullet_max_chars: 200,
            fallback_max_lines: 10,
            encouragement_keywords: [
                "次の章",
                "ぜひ",
                "お疲れ",
                "頑張",
                "できます",
                "一緒に",
                "あなたは",
                "お母さん",
                "大丈夫",
                "応援",
                "素晴らしい",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Key phrases whose frequency is audited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyPhraseConfig {
    /// Case-insensitive regular expressions, counted independently.
    pub patterns: Vec<String>,
    /// How many matching chapters to itemize per phrase.
    pub chapter_limit: usize,
}

impl Default for KeyPhraseConfig {
    fn default() -> Self {
        Self {
            patterns: [
                "成長ホルモンの70～80%",
                "思春期が早く始まる",
                r"父の身長 \+ 母の身長 \+ 13",
                "骨端線が閉じ",
                "寝る子は育つ",
                "タンパク質.*40～50g",
                "縄跳び.*コスパ",
                "肥満.*思春期",
                "睡眠不足.*年間1～2cm",
                "ストレス.*成長ホルモン",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            chapter_limit: 5,
        }
    }
}

/// Marker words signaling worked examples and case narratives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CaseStudyConfig {
    /// Literal marker words.
    pub markers: Vec<String>,
    /// Chapters with strictly more markers than this are reported.
    pub threshold: usize,
}

impl Default for CaseStudyConfig {
    fn default() -> Self {
        Self {
            markers: ["ケース", "実例", "太郎", "花子", "母親", "実際"]
                .into_iter()
                .map(String::from)
                .collect(),
            threshold: 20,
        }
    }
}

/// Limits applied when printing a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Repeated sentences to list.
    pub top_sentences: usize,
    /// Characters of each repeated sentence to show.
    pub preview_chars: usize,
    /// Summary sections to list.
    pub top_summaries: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_sentences: 15,
            preview_chars: 80,
            top_summaries: 10,
        }
    }
}
