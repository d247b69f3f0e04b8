//! Summary section simplification.
//!
//! Chapter-end summaries tend to accumulate prose: restated explanations,
//! encouragement, previews of the next chapter. The simplifier keeps the
//! structured core of the last summary section and drops the rest.
//!
//! ## Retention Rules
//!
//! Each body line is classified on its own:
//!
//! ```text
//! **重要：睡眠は22時まで**          -> Emphasis  (bold, optionally after a list marker)
//! - 睡眠時間を確保する               -> Bullet    (dash or numbered, short, no encouragement)
//! - ぜひ一緒に頑張りましょう         -> Drop      (encouragement keyword)
//! - <250 characters of explanation> -> Drop      (over the length ceiling)
//! 成長ホルモンは睡眠中に……           -> Drop      (plain prose)
//! ```
//!
//! Kept lines stay in their original order. When nothing qualifies, the
//! first few non-empty lines free of encouragement keywords are kept instead,
//! so a summary written as pure prose still shrinks to something bounded.
//!
//! ## Guarantees
//!
//! - Bodies shorter than `skip_below` characters are never touched.
//! - A rewrite is only applied when it makes the body strictly shorter, so
//!   `new_len <= original_len` always holds.
//! - Simplifying twice gives the same text as simplifying once.
//! - Only the last matching summary section is rewritten; the rest of the
//!   chapter is copied through byte for byte.

use std::path::{Path, PathBuf};

use crate::config::SummaryConfig;
use crate::corpus::{Chapter, Corpus};
use crate::matcher::{HeadingMatcher, LiteralMatcher, Matcher};
use crate::section::find_section;
use crate::{Error, Result};

/// How a summary body line is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Starts with a bold marker; always kept.
    Emphasis,
    /// A short list item without encouragement; kept.
    Bullet,
    /// Everything else.
    Drop,
}

/// Why a summary section was left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// The body is shorter than `skip_below`.
    Concise,
    /// Applying the retention rules would not make the body shorter.
    Irreducible,
}

/// What [`SummarySimplifier::simplify`] found in a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// No summary heading.
    Absent,
    /// A summary heading with nothing under it.
    Empty,
    /// A summary that was left as is.
    Kept(KeepReason),
    /// A summary rewritten to a shorter body.
    Rewritten,
}

/// Result of simplifying one chapter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplification {
    /// The chapter text, rewritten or unchanged.
    pub text: String,
    /// What was found and done.
    pub state: SummaryState,
    /// Summary body length before, in characters. 0 when there is no summary.
    pub original_len: usize,
    /// Summary body length after, in characters. 0 when there is no summary.
    pub new_len: usize,
}

impl Simplification {
    fn unchanged(text: &str, state: SummaryState, len: usize) -> Self {
        Self {
            text: text.to_string(),
            state,
            original_len: len,
            new_len: len,
        }
    }

    /// Whether the summary section was rewritten.
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        self.state == SummaryState::Rewritten
    }

    /// Percentage of the body removed, or `None` when there was no body.
    #[must_use]
    pub fn reduction_percent(&self) -> Option<f64> {
        reduction_percent(self.original_len, self.new_len)
    }
}

/// `(original - new) / original * 100`, undefined when `original` is 0.
#[must_use]
pub fn reduction_percent(original: usize, new: usize) -> Option<f64> {
    if original == 0 {
        return None;
    }
    Some(original.saturating_sub(new) as f64 / original as f64 * 100.0)
}

/// Rewrites summary sections according to the retention rules.
///
/// ## Example
///
/// ```rust
/// use tomes::{Config, SummarySimplifier};
///
/// let simplifier = SummarySimplifier::new(&Config::default().summary).unwrap();
///
/// let prose = "成長ホルモンについて説明しました。".repeat(40);
/// let text = format!("# 第1章\n## まとめ\n- 睡眠を優先する\n{prose}\n");
///
/// let result = simplifier.simplify(&text);
/// assert!(result.is_rewritten());
/// assert_eq!(result.text, "# 第1章\n## まとめ\n\n- 睡眠を優先する\n");
/// ```
#[derive(Debug)]
pub struct SummarySimplifier {
    heading: HeadingMatcher,
    skip_below: usize,
    bullet_max_chars: usize,
    fallback_max_lines: usize,
    encouragement: LiteralMatcher,
}

impl SummarySimplifier {
    /// Build a simplifier from the `[summary]` table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the heading label does not compile.
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        Ok(Self {
            heading: HeadingMatcher::from_config(config)?,
            skip_below: config.skip_below,
            bullet_max_chars: config.bullet_max_chars,
            fallback_max_lines: config.fallback_max_lines,
            encouragement: LiteralMatcher::new(config.encouragement_keywords.iter().cloned()),
        })
    }

    /// Classify one body line.
    #[must_use]
    pub fn classify(&self, line: &str) -> Retention {
        let stripped = line.trim();
        let item = strip_list_marker(stripped);
        // `* ` only introduces emphasis; a bare `* item` is not a bullet
        let content = item
            .or_else(|| stripped.strip_prefix("* ").map(str::trim_start))
            .unwrap_or(stripped);

        if content.starts_with("**") {
            return Retention::Emphasis;
        }
        if item.is_some()
            && stripped.chars().count() < self.bullet_max_chars
            && !self.encouragement.matches(stripped)
        {
            return Retention::Bullet;
        }
        Retention::Drop
    }

    /// Simplify the last summary section of `text`.
    ///
    /// Without a summary section the text is returned unchanged with both
    /// lengths 0.
    #[must_use]
    pub fn simplify(&self, text: &str) -> Simplification {
        let Some(section) = find_section(text, &self.heading) else {
            return Simplification::unchanged(text, SummaryState::Absent, 0);
        };

        let original_len = section.body_chars();
        if original_len == 0 {
            tracing::debug!("summary section is empty");
            return Simplification::unchanged(text, SummaryState::Empty, 0);
        }
        if original_len < self.skip_below {
            tracing::debug!(chars = original_len, "summary already concise");
            let state = SummaryState::Kept(KeepReason::Concise);
            return Simplification::unchanged(text, state, original_len);
        }

        let body = self.rewrite_body(&section.body);
        let new_len = body.chars().count();
        if new_len >= original_len {
            tracing::debug!(chars = original_len, "rewrite would not shrink summary");
            let state = SummaryState::Kept(KeepReason::Irreducible);
            return Simplification::unchanged(text, state, original_len);
        }

        let mut rewritten = String::with_capacity(text.len() - section.body.len() + body.len());
        rewritten.push_str(&text[..section.start]);
        rewritten.push_str(&body);
        rewritten.push_str(&text[section.end..]);

        Simplification {
            text: rewritten,
            state: SummaryState::Rewritten,
            original_len,
            new_len,
        }
    }

    /// The replacement body: kept lines framed by newlines.
    fn rewrite_body(&self, body: &str) -> String {
        let lines: Vec<&str> = body.split('\n').collect();

        let mut kept: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| self.classify(line) != Retention::Drop)
            .collect();

        if kept.is_empty() {
            tracing::debug!("no emphasis or bullet lines, keeping leading prose");
            kept = lines
                .into_iter()
                .filter(|line| !line.trim().is_empty() && !self.encouragement.matches(line))
                .take(self.fallback_max_lines)
                .collect();
        }

        format!("\n{}\n", kept.join("\n"))
    }

    /// Simplify a chapter in place.
    pub fn simplify_chapter(&self, chapter: &mut Chapter) -> ChapterStatus {
        let result = self.simplify(&chapter.text);
        let status = ChapterStatus::from_simplification(&result);
        if result.is_rewritten() {
            chapter.text = result.text;
        }
        tracing::debug!(chapter = %chapter.name, ?status, "simplified");
        status
    }

    /// Simplify every chapter of an in-memory corpus.
    pub fn simplify_corpus(&self, corpus: &mut Corpus) -> BatchReport {
        let outcomes = corpus
            .chapters_mut()
            .iter_mut()
            .map(|chapter| ChapterOutcome {
                status: self.simplify_chapter(chapter),
                chapter: chapter.name.clone(),
            })
            .collect();
        BatchReport { outcomes }
    }

    /// Read, simplify and (when `write` is set) persist each named chapter.
    ///
    /// Every chapter is handled independently: a missing or unwritable file
    /// is recorded in its outcome and the batch moves on.
    pub fn simplify_files<S: AsRef<str>>(
        &self,
        dir: &Path,
        names: &[S],
        write: bool,
    ) -> BatchReport {
        let outcomes = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                ChapterOutcome {
                    chapter: name.to_string(),
                    status: self.simplify_file(&dir.join(name), write),
                }
            })
            .collect();
        BatchReport { outcomes }
    }

    fn simplify_file(&self, path: &Path, write: bool) -> ChapterStatus {
        let mut chapter = match Chapter::read(path) {
            Ok(chapter) => chapter,
            Err(Error::MissingInput(path)) => {
                tracing::warn!(path = %path.display(), "chapter file missing, skipping");
                return ChapterStatus::Missing(path);
            }
            Err(e) => {
                tracing::warn!(error = %e, "chapter unreadable, skipping");
                return ChapterStatus::Failed(e);
            }
        };

        let status = self.simplify_chapter(&mut chapter);
        if write && matches!(status, ChapterStatus::Rewritten { .. }) {
            if let Err(e) = chapter.persist(path) {
                tracing::warn!(error = %e, "could not write chapter, skipping");
                return ChapterStatus::Failed(e);
            }
        }
        status
    }
}

/// Strip a leading `- ` or `N.` list marker, returning the item text.
fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(rest.trim_start());
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.').map(str::trim_start)
}

/// What happened to one chapter in a batch.
#[derive(Debug)]
pub enum ChapterStatus {
    /// The summary was rewritten.
    Rewritten {
        /// Body length before, in characters.
        original_len: usize,
        /// Body length after, in characters.
        new_len: usize,
    },
    /// A summary exists but was left as is.
    Unchanged {
        /// Body length in characters.
        len: usize,
        /// Why it was not rewritten.
        reason: KeepReason,
    },
    /// A summary heading with an empty body.
    EmptySummary,
    /// No summary heading in the chapter.
    NoSummary,
    /// The chapter file does not exist.
    Missing(PathBuf),
    /// Reading or writing the chapter failed.
    Failed(Error),
}

impl ChapterStatus {
    fn from_simplification(result: &Simplification) -> Self {
        match result.state {
            SummaryState::Rewritten => Self::Rewritten {
                original_len: result.original_len,
                new_len: result.new_len,
            },
            SummaryState::Kept(reason) => Self::Unchanged {
                len: result.original_len,
                reason,
            },
            SummaryState::Empty => Self::EmptySummary,
            SummaryState::Absent => Self::NoSummary,
        }
    }

    /// Percentage removed, defined only for rewritten summaries.
    #[must_use]
    pub fn reduction_percent(&self) -> Option<f64> {
        match *self {
            Self::Rewritten {
                original_len,
                new_len,
            } => reduction_percent(original_len, new_len),
            Self::Unchanged { len, .. } => reduction_percent(len, len),
            _ => None,
        }
    }
}

/// One chapter's outcome.
#[derive(Debug)]
pub struct ChapterOutcome {
    /// Chapter name.
    pub chapter: String,
    /// What happened.
    pub status: ChapterStatus,
}

/// Outcomes for a whole batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-chapter outcomes.
    pub outcomes: Vec<ChapterOutcome>,
}

impl BatchReport {
    fn rewritten(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.outcomes.iter().filter_map(|o| match o.status {
            ChapterStatus::Rewritten {
                original_len,
                new_len,
            } => Some((original_len, new_len)),
            _ => None,
        })
    }

    /// Sum of original body lengths over rewritten chapters.
    #[must_use]
    pub fn total_original(&self) -> usize {
        self.rewritten().map(|(original, _)| original).sum()
    }

    /// Sum of new body lengths over rewritten chapters.
    #[must_use]
    pub fn total_new(&self) -> usize {
        self.rewritten().map(|(_, new)| new).sum()
    }

    /// Aggregate reduction over rewritten chapters; `None` if none were.
    #[must_use]
    pub fn reduction_percent(&self) -> Option<f64> {
        reduction_percent(self.total_original(), self.total_new())
    }

    /// Chapters that were missing or failed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ChapterStatus::Missing(_) | ChapterStatus::Failed(_)))
            .count()
    }
}
