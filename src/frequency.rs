//! Redundancy and frequency analysis over a whole corpus.
//!
//! Five read-only measurements support editorial decisions about what to cut:
//!
//! | Measurement | Question it answers |
//! |-------------|---------------------|
//! | Repeated sentences | Which passages were pasted into several chapters? |
//! | Chapter volume | Which chapters are the longest? |
//! | Summary sizes | Which chapter-end summaries have bloated? |
//! | Key phrases | How often is the same fact restated? |
//! | Case-study density | Which chapters lean hardest on anecdotes? |
//!
//! Nothing here edits the corpus. Repetition is measured across the whole
//! corpus rather than per chapter, because the point is to find content
//! duplicated *between* chapters.

use std::collections::HashMap;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::matcher::{HeadingMatcher, LiteralMatcher, Matcher, PatternMatcher};
use crate::section::find_section;
use crate::sentence::SentenceSegmenter;
use crate::Result;

/// A sentence seen at least `min_count` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedSentence {
    /// The trimmed sentence.
    pub text: String,
    /// Occurrences across the corpus, within-chapter repeats included.
    pub count: usize,
}

/// Size of one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterVolume {
    /// Chapter name.
    pub chapter: String,
    /// `\n`-delimited segments, trailing empty one included.
    pub lines: usize,
    /// Raw length in characters.
    pub chars: usize,
}

/// Size of one chapter's summary section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySize {
    /// Chapter name.
    pub chapter: String,
    /// Body length in characters.
    pub chars: usize,
}

/// Occurrences of one key phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCount {
    /// The pattern as configured.
    pub phrase: String,
    /// Matches across every chapter.
    pub total: usize,
    /// Per-chapter counts for the first matching chapters, in corpus order.
    pub chapters: Vec<(String, usize)>,
}

/// Case-study marker count for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStudyDensity {
    /// Chapter name.
    pub chapter: String,
    /// Marker occurrences.
    pub count: usize,
}

/// All five measurements for one corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedundancyReport {
    /// Sorted by count, descending.
    pub repeated_sentences: Vec<RepeatedSentence>,
    /// Sorted by characters, descending.
    pub volumes: Vec<ChapterVolume>,
    /// Sorted by characters, descending.
    pub summaries: Vec<SummarySize>,
    /// In configured pattern order; phrases with no match are omitted.
    pub key_phrases: Vec<PhraseCount>,
    /// In corpus order; only chapters over the threshold.
    pub case_studies: Vec<CaseStudyDensity>,
}

/// Runs the redundancy measurements with compiled patterns.
///
/// ## Example
///
/// ```rust
/// use tomes::{Chapter, Config, Corpus, FrequencyAnalyzer};
///
/// let analyzer = FrequencyAnalyzer::new(&Config::default()).unwrap();
/// let corpus = Corpus::new(vec![
///     Chapter::new("01.md", "# 第1章\n寝る子は育つ。"),
///     Chapter::new("02.md", "# 第2章\n寝る子は育つと言います。"),
/// ]);
///
/// let phrases = analyzer.key_phrase_counts(&corpus);
/// assert_eq!(phrases[0].phrase, "寝る子は育つ");
/// assert_eq!(phrases[0].total, 2);
/// ```
#[derive(Debug)]
pub struct FrequencyAnalyzer {
    segmenter: SentenceSegmenter,
    min_count: usize,
    summary_heading: HeadingMatcher,
    phrases: Vec<PatternMatcher>,
    phrase_chapter_limit: usize,
    case_markers: LiteralMatcher,
    case_threshold: usize,
}

impl FrequencyAnalyzer {
    /// Compile every pattern named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] for the first pattern that
    /// does not compile.
    pub fn new(config: &Config) -> Result<Self> {
        let phrases = config
            .key_phrases
            .patterns
            .iter()
            .map(|p| PatternMatcher::new(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            segmenter: SentenceSegmenter::from_config(&config.sentence),
            min_count: config.repetition.min_count,
            summary_heading: HeadingMatcher::from_config(&config.summary)?,
            phrases,
            phrase_chapter_limit: config.key_phrases.chapter_limit,
            case_markers: LiteralMatcher::new(config.case_study.markers.iter().cloned()),
            case_threshold: config.case_study.threshold,
        })
    }

    /// Run all five measurements.
    #[must_use]
    pub fn analyze(&self, corpus: &Corpus) -> RedundancyReport {
        tracing::debug!(chapters = corpus.len(), "analyzing corpus");
        let joined = corpus.joined_text();
        let sentences = self.segmenter.segment(&joined);

        RedundancyReport {
            repeated_sentences: count_repeated_sentences(&sentences, self.min_count),
            volumes: chapter_volume_stats(corpus),
            summaries: summary_section_stats(corpus, &self.summary_heading),
            key_phrases: self.key_phrase_counts(corpus),
            case_studies: self.case_study_density(corpus),
        }
    }

    /// Repeated sentences across the whole corpus.
    #[must_use]
    pub fn repeated_sentences(&self, corpus: &Corpus) -> Vec<RepeatedSentence> {
        let joined = corpus.joined_text();
        count_repeated_sentences(&self.segmenter.segment(&joined), self.min_count)
    }

    /// Summary body sizes using the configured heading.
    #[must_use]
    pub fn summary_sizes(&self, corpus: &Corpus) -> Vec<SummarySize> {
        summary_section_stats(corpus, &self.summary_heading)
    }

    /// Key-phrase totals and per-chapter breakdowns.
    #[must_use]
    pub fn key_phrase_counts(&self, corpus: &Corpus) -> Vec<PhraseCount> {
        key_phrase_counts(corpus, &self.phrases, self.phrase_chapter_limit)
    }

    /// Chapters with more case-study markers than the configured threshold.
    #[must_use]
    pub fn case_study_density(&self, corpus: &Corpus) -> Vec<CaseStudyDensity> {
        case_study_density(corpus, &self.case_markers, self.case_threshold)
    }
}

/// Count each distinct sentence and keep those seen at least `min_count` times.
///
/// Sorted by count descending; ties keep first-occurrence order.
#[must_use]
pub fn count_repeated_sentences<S: AsRef<str>>(
    sentences: &[S],
    min_count: usize,
) -> Vec<RepeatedSentence> {
    // (count, first occurrence) per distinct sentence
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, sentence) in sentences.iter().enumerate() {
        counts.entry(sentence.as_ref()).or_insert((0, i)).0 += 1;
    }

    let mut repeated: Vec<_> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= min_count)
        .collect();
    repeated.sort_by_key(|&(_, (count, first))| (std::cmp::Reverse(count), first));

    repeated
        .into_iter()
        .map(|(text, (count, _))| RepeatedSentence {
            text: text.to_string(),
            count,
        })
        .collect()
}

/// Line and character counts per chapter, largest first.
#[must_use]
pub fn chapter_volume_stats(corpus: &Corpus) -> Vec<ChapterVolume> {
    let mut volumes: Vec<_> = corpus
        .chapters()
        .iter()
        .map(|c| ChapterVolume {
            chapter: c.name.clone(),
            lines: c.line_count(),
            chars: c.char_count(),
        })
        .collect();
    volumes.sort_by(|a, b| b.chars.cmp(&a.chars));
    volumes
}

/// Body size of each chapter's last matching section, largest first.
///
/// Chapters without a matching section are left out.
#[must_use]
pub fn summary_section_stats(corpus: &Corpus, heading: &HeadingMatcher) -> Vec<SummarySize> {
    let mut sizes: Vec<_> = corpus
        .chapters()
        .iter()
        .filter_map(|c| {
            let section = find_section(&c.text, heading)?;
            Some(SummarySize {
                chapter: c.name.clone(),
                chars: section.body_chars(),
            })
        })
        .collect();
    sizes.sort_by(|a, b| b.chars.cmp(&a.chars));
    sizes
}

/// Count each pattern across the corpus.
///
/// Patterns are counted independently, so overlapping phrases both count.
/// At most `chapter_limit` matching chapters are itemized per phrase.
#[must_use]
pub fn key_phrase_counts(
    corpus: &Corpus,
    patterns: &[PatternMatcher],
    chapter_limit: usize,
) -> Vec<PhraseCount> {
    patterns
        .iter()
        .filter_map(|pattern| {
            let per_chapter: Vec<(String, usize)> = corpus
                .chapters()
                .iter()
                .map(|c| (c.name.clone(), pattern.count(&c.text)))
                .filter(|&(_, n)| n > 0)
                .collect();

            let total: usize = per_chapter.iter().map(|&(_, n)| n).sum();
            if total == 0 {
                return None;
            }

            Some(PhraseCount {
                phrase: pattern.as_str().to_string(),
                total,
                chapters: per_chapter.into_iter().take(chapter_limit).collect(),
            })
        })
        .collect()
}

/// Chapters whose marker count strictly exceeds `threshold`, in corpus order.
#[must_use]
pub fn case_study_density(
    corpus: &Corpus,
    markers: &dyn Matcher,
    threshold: usize,
) -> Vec<CaseStudyDensity> {
    corpus
        .chapters()
        .iter()
        .map(|c| CaseStudyDensity {
            chapter: c.name.clone(),
            count: markers.count(&c.text),
        })
        .filter(|d| d.count > threshold)
        .collect()
}
