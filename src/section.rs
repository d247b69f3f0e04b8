//! Heading-delimited sections of a chapter.
//!
//! A section starts at a heading line and runs until one of:
//!
//! - the next heading of equal or lesser depth (`##` ends at `##` or `#`, not `###`)
//! - the next line starting with `---` (document separator)
//! - end of text
//!
//! ```text
//! ## 第3章のまとめ\n        <- heading line
//! - 要点1\n                 <- body start
//! - 要点2                   <- body end (exclusive, before the \n)
//! \n---\n                   <- boundary; its leading \n is not body
//! ```
//!
//! When several headings match, the **last** one wins: a book that grew a
//! second summary block keeps its most current wording.

use crate::matcher::{heading_depth, HeadingMatcher};

/// A section found in a chapter: its heading line and body, with byte offsets.
///
/// `start` and `end` delimit the body and index into the text the section was
/// found in:
///
/// ```rust
/// use tomes::{find_section, HeadingMatcher, PatternMatcher};
///
/// let text = "# Title\n## Summary\nbody text\n## Next\n";
/// let matcher = HeadingMatcher::new(PatternMatcher::new("summary").unwrap(), None);
/// let section = find_section(text, &matcher).unwrap();
///
/// assert_eq!(section.heading, "## Summary");
/// assert_eq!(&text[section.span()], "body text");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The heading line, without its line terminator.
    pub heading: String,
    /// The body text.
    pub body: String,
    /// Number of `#` markers on the heading.
    pub depth: usize,
    /// Byte offset of the heading line.
    pub heading_start: usize,
    /// Byte offset where the body starts.
    pub start: usize,
    /// Byte offset where the body ends (exclusive).
    pub end: usize,
}

impl Section {
    /// Body length in characters.
    #[must_use]
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The byte span of the body in the original text.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Section {{ heading: {:?}, span: {}..{}, chars: {} }}",
            self.heading,
            self.start,
            self.end,
            self.body_chars()
        )
    }
}

/// Find the last section whose heading satisfies `matcher`.
///
/// Returns `None` when no heading matches.
#[must_use]
pub fn find_section(text: &str, matcher: &HeadingMatcher) -> Option<Section> {
    find_sections(text, matcher).pop()
}

/// Find every section whose heading satisfies `matcher`, in document order.
#[must_use]
pub fn find_sections(text: &str, matcher: &HeadingMatcher) -> Vec<Section> {
    let lines = line_offsets(text);
    let mut sections = Vec::new();

    for (i, &(line_start, line)) in lines.iter().enumerate() {
        let Some(depth) = matcher.match_line(line) else {
            continue;
        };

        let start = line_start + line.len();
        let boundary = lines[i + 1..]
            .iter()
            .find(|(_, l)| is_boundary(l, depth))
            .map(|&(offset, _)| offset);

        // The newline before the boundary line belongs to the boundary
        let end = match boundary {
            Some(offset) => offset.saturating_sub(1).max(start),
            None => text.len(),
        };

        sections.push(Section {
            heading: line.trim_end_matches(['\n', '\r']).to_string(),
            body: text[start..end].to_string(),
            depth,
            heading_start: line_start,
            start,
            end,
        });
    }

    tracing::trace!(count = sections.len(), "matched sections");
    sections
}

fn is_boundary(line: &str, depth: usize) -> bool {
    line.starts_with("---") || heading_depth(line).is_some_and(|d| d <= depth)
}

/// Lines with their terminators, paired with their byte offsets.
fn line_offsets(text: &str) -> Vec<(usize, &str)> {
    text.split_inclusive('\n')
        .scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line))
        })
        .collect()
}
