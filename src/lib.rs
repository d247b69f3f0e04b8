//! # tomes
//!
//! Redundancy analysis and summary simplification for books written as one
//! markdown file per chapter.
//!
//! ## The Problem
//!
//! Long-form books written chapter by chapter drift. The same explanation
//! gets pasted into three chapters, a key fact is restated a dozen times, and
//! every chapter ends with a "summary" that grows a little longer with each
//! revision until it repeats the chapter instead of distilling it.
//!
//! None of this is visible from inside a single chapter. It takes a pass over
//! the whole corpus.
//!
//! ## Two Tools
//!
//! ### Analysis (read-only)
//!
//! [`FrequencyAnalyzer`] measures the corpus and edits nothing:
//!
//! ```text
//! Corpus ──┬── SentenceSegmenter ──> repeated sentences (across chapters)
//!          ├── per chapter ────────> line / character volume
//!          ├── find_section ───────> summary section sizes
//!          └── Matcher ────────────> key-phrase counts, case-study density
//! ```
//!
//! ### Simplification (rewrite)
//!
//! [`SummarySimplifier`] finds the last summary section of a chapter and
//! keeps only its bold lines and short bullet points:
//!
//! ```text
//! ## 第3章のまとめ                    ## 第3章のまとめ
//! **睡眠が最優先**
//! - 22時までに寝る             ──>    **睡眠が最優先**
//! この章では睡眠について……            - 22時までに寝る
//! 一緒に頑張りましょう！
//! ```
//!
//! Summaries shorter than a threshold are left alone, a rewrite never makes a
//! summary longer, and running it twice is the same as running it once.
//!
//! ## Quick Start
//!
//! ```rust
//! use tomes::{Chapter, Config, Corpus, FrequencyAnalyzer, SummarySimplifier};
//!
//! let config = Config::default();
//! let mut corpus = Corpus::new(vec![
//!     Chapter::new("01.md", "# 第1章\n本文。\n## まとめ\n- 睡眠を優先する\n"),
//! ]);
//!
//! // Read-only measurements
//! let analyzer = FrequencyAnalyzer::new(&config).unwrap();
//! let report = analyzer.analyze(&corpus);
//! assert_eq!(report.summaries[0].chars, "- 睡眠を優先する\n".chars().count());
//!
//! // Rewrite in memory; short summaries are untouched
//! let simplifier = SummarySimplifier::new(&config.summary).unwrap();
//! let batch = simplifier.simplify_corpus(&mut corpus);
//! assert_eq!(batch.reduction_percent(), None);
//! ```
//!
//! ## Character Counts
//!
//! Every length reported or compared against a threshold is a count of
//! Unicode scalar values, not bytes: a 30-character Japanese sentence is 90
//! bytes of UTF-8. Offsets on [`Section`] are byte offsets so they can slice
//! the source text directly.

mod config;
mod corpus;
mod error;
mod frequency;
mod matcher;
pub mod report;
mod section;
mod sentence;
mod simplify;

pub use config::{
    CaseStudyConfig, Config, KeyPhraseConfig, RepetitionConfig, ReportConfig, SentenceConfig,
    SummaryConfig,
};
pub use corpus::{chapter_names, chapter_paths, Chapter, Corpus, LoadOutcome};
pub use error::{Error, Result};
pub use frequency::{
    case_study_density, chapter_volume_stats, count_repeated_sentences, key_phrase_counts,
    summary_section_stats, CaseStudyDensity, ChapterVolume, FrequencyAnalyzer, PhraseCount,
    RedundancyReport, RepeatedSentence, SummarySize,
};
pub use matcher::{heading_depth, HeadingMatcher, LiteralMatcher, Matcher, PatternMatcher};
pub use section::{find_section, find_sections, Section};
pub use sentence::{SentenceBoundary, SentenceSegmenter};
pub use simplify::{
    reduction_percent, BatchReport, ChapterOutcome, ChapterStatus, KeepReason, Retention,
    Simplification, SummarySimplifier, SummaryState,
};
