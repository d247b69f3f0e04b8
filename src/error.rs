//! Error types for tomes.

use std::path::PathBuf;

/// Errors that can occur while loading, analyzing or rewriting a corpus.
///
/// Absence of a summary section and an undefined reduction percentage are not
/// errors: they surface as `None` from the operations that produce them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A named chapter file does not exist.
    #[error("chapter file not found: {0}")]
    MissingInput(PathBuf),

    /// A configured pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// The compile error.
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A configured value violates a constraint.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for tomes operations.
pub type Result<T> = std::result::Result<T, Error>;
