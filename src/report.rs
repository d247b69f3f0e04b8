//! Plain-text rendering of analysis and simplification results.

use std::io::{self, Write};

use crate::config::ReportConfig;
use crate::frequency::RedundancyReport;
use crate::simplify::{BatchReport, ChapterStatus, KeepReason};

const RULE_WIDTH: usize = 80;

/// Render a redundancy report.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_analysis<W: Write>(
    out: &mut W,
    report: &RedundancyReport,
    limits: &ReportConfig,
) -> io::Result<()> {
    banner(out, "Redundancy analysis")?;

    heading(out, "1. Repeated sentences")?;
    for (i, sentence) in report
        .repeated_sentences
        .iter()
        .take(limits.top_sentences)
        .enumerate()
    {
        writeln!(
            out,
            "{}. [{}x] {}",
            i + 1,
            sentence.count,
            preview(&sentence.text, limits.preview_chars)
        )?;
    }
    writeln!(out)?;

    heading(out, "2. Chapter volume")?;
    for v in &report.volumes {
        writeln!(out, "{:25} {:5} lines {:7} chars", v.chapter, v.lines, v.chars)?;
    }
    writeln!(out)?;

    heading(out, "3. Summary sections")?;
    for s in report.summaries.iter().take(limits.top_summaries) {
        writeln!(out, "{:25} {:5} chars", s.chapter, s.chars)?;
    }
    writeln!(out)?;

    heading(out, "4. Key phrases")?;
    for phrase in &report.key_phrases {
        let chapters: Vec<String> = phrase
            .chapters
            .iter()
            .map(|(name, n)| format!("{name}:{n}"))
            .collect();
        writeln!(
            out,
            "\"{}\" -> {} total [{}]",
            phrase.phrase,
            phrase.total,
            chapters.join(", ")
        )?;
    }
    writeln!(out)?;

    heading(out, "5. Case studies")?;
    for d in &report.case_studies {
        writeln!(out, "{:25} {:3} markers", d.chapter, d.count)?;
    }
    writeln!(out)?;

    banner(out, "Analysis complete")
}

/// Render per-chapter simplification outcomes and the aggregate.
///
/// Chapters without a percentage (no summary, skipped) are listed without one.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_batch<W: Write>(out: &mut W, batch: &BatchReport) -> io::Result<()> {
    for outcome in &batch.outcomes {
        let name = &outcome.chapter;
        match &outcome.status {
            ChapterStatus::Rewritten {
                original_len,
                new_len,
            } => {
                write!(out, "✓ {name:25} {original_len:5} chars -> {new_len:5} chars")?;
                match outcome.status.reduction_percent() {
                    Some(pct) => writeln!(out, " ({pct:.0}% reduction)")?,
                    None => writeln!(out)?,
                }
            }
            ChapterStatus::Unchanged { len, reason } => {
                let why = match reason {
                    KeepReason::Concise => "already concise",
                    KeepReason::Irreducible => "nothing to trim",
                };
                writeln!(out, "= {name:25} {len:5} chars ({why})")?;
            }
            ChapterStatus::EmptySummary => writeln!(out, "- {name:25} summary section is empty")?,
            ChapterStatus::NoSummary => writeln!(out, "- {name:25} no summary section")?,
            ChapterStatus::Missing(path) => {
                writeln!(out, "! {name:25} skipped: {} not found", path.display())?;
            }
            ChapterStatus::Failed(e) => writeln!(out, "! {name:25} skipped: {e}")?,
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    write!(
        out,
        "Total: {} chars -> {} chars",
        batch.total_original(),
        batch.total_new()
    )?;
    match batch.reduction_percent() {
        Some(pct) => writeln!(out, " ({pct:.0}% reduction)")?,
        None => writeln!(out)?,
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "[{title}]")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// First `max_chars` characters, with an ellipsis if anything was cut.
fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
