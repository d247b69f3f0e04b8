//! The chapter corpus and its file-system loader.
//!
//! A book is a directory with one markdown file per chapter. Chapter order is
//! file-name order (`01_…`, `02_…`), or the explicit order of a configured
//! list of names.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// One chapter: an identifier and its full raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// File name of the chapter, used as its identifier in reports.
    pub name: String,
    /// Full raw text, markup included.
    pub text: String,
}

impl Chapter {
    /// Create a chapter from a name and its text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a chapter from disk, named after its file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] if the file does not exist and
    /// [`Error::Io`] if it cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, text })
    }

    /// Write the chapter text to `path`, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn persist(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.text).map_err(|e| Error::io(path, e))?;
        tracing::info!(chapter = %self.name, path = %path.display(), "wrote chapter");
        Ok(())
    }

    /// The text of the first heading line, without its `#` markers.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.text.lines().find_map(|line| {
            let depth = crate::matcher::heading_depth(line)?;
            let title = line[depth..].trim();
            (!title.is_empty()).then_some(title)
        })
    }

    /// Number of `\n`-delimited segments, counting a trailing empty one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Length of the raw text in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// What happened to one name in [`Corpus::load_named`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// The chapter was loaded into the corpus.
    Loaded(String),
    /// The file does not exist; the chapter was skipped.
    Missing(PathBuf),
    /// The file exists but could not be read; the chapter was skipped.
    Failed(Error),
}

/// An ordered set of chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    chapters: Vec<Chapter>,
}

impl Corpus {
    /// Create a corpus from chapters, keeping their order.
    #[must_use]
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// Load every file in `dir` with the given extension, in file-name order.
    ///
    /// Unreadable chapter files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be listed.
    pub fn load_dir(dir: &Path, extension: &str) -> Result<Self> {
        let (corpus, _) = Self::load_book(dir, extension, &[] as &[&str])?;
        Ok(corpus)
    }

    /// Load the `configured` chapters from `dir`, or every chapter file when
    /// the list is empty. See [`chapter_names`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory has to be listed and cannot be.
    pub fn load_book<S: AsRef<str>>(
        dir: &Path,
        extension: &str,
        configured: &[S],
    ) -> Result<(Self, Vec<LoadOutcome>)> {
        let names = chapter_names(dir, extension, configured)?;
        let (corpus, outcomes) = Self::load_named(dir, &names);
        tracing::info!(dir = %dir.display(), chapters = corpus.len(), "loaded corpus");
        Ok((corpus, outcomes))
    }

    /// Load an explicit list of chapter files from `dir`, in list order.
    ///
    /// Missing or unreadable files are skipped and reported in the returned
    /// outcomes; they never abort the load.
    pub fn load_named<S: AsRef<str>>(dir: &Path, names: &[S]) -> (Self, Vec<LoadOutcome>) {
        let mut chapters = Vec::with_capacity(names.len());
        let mut outcomes = Vec::with_capacity(names.len());

        for name in names {
            let path = dir.join(name.as_ref());
            match Chapter::read(&path) {
                Ok(chapter) => {
                    outcomes.push(LoadOutcome::Loaded(chapter.name.clone()));
                    chapters.push(chapter);
                }
                Err(Error::MissingInput(path)) => {
                    tracing::warn!(path = %path.display(), "chapter file missing, skipping");
                    outcomes.push(LoadOutcome::Missing(path));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "chapter unreadable, skipping");
                    outcomes.push(LoadOutcome::Failed(e));
                }
            }
        }

        (Self::new(chapters), outcomes)
    }

    /// The chapters, in order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Mutable access for in-place rewriting.
    pub fn chapters_mut(&mut self) -> &mut [Chapter] {
        &mut self.chapters
    }

    /// Look up a chapter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.name == name)
    }

    /// Number of chapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the corpus has no chapters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// All chapter texts joined with newlines.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.chapters
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Files in `dir` with the given extension, sorted by file name.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be listed.
pub fn chapter_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// The chapter file names to process: `configured` when it is non-empty,
/// otherwise every file in `dir` with the given extension, sorted.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory has to be listed and cannot be.
pub fn chapter_names<S: AsRef<str>>(
    dir: &Path,
    extension: &str,
    configured: &[S],
) -> Result<Vec<String>> {
    if !configured.is_empty() {
        return Ok(configured.iter().map(|n| n.as_ref().to_string()).collect());
    }
    let names = chapter_paths(dir, extension)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    Ok(names)
}

impl FromIterator<Chapter> for Corpus {
    fn from_iter<I: IntoIterator<Item = Chapter>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
