//! Error types for the Strict Output Contract
//!
//! Parsing distinguishes two failures:
//! - [`SocError::InvalidHeader`]: the input is not a patch at all; parsing
//!   stopped at the first non-blank line
//! - [`SocError::Invalid`]: the input was parsed end to end but broke the
//!   contract; every violation is listed
//!
//! Both carry the partially built [`Patch`] so callers can inspect what was
//! recovered. [`InputError`] covers the cheap pre-check run before parsing.

use crate::patch::Patch;

/// Parse failures
#[derive(Debug, thiserror::Error)]
pub enum SocError {
    /// First non-blank line is not the contract header
    #[error("invalid header at line {line}: expected '{expected}', got '{found}'")]
    InvalidHeader {
        line: usize,
        expected: &'static str,
        found: String,
        patch: Box<Patch>,
    },

    /// Contract violations collected over the whole input
    #[error("invalid patch: {summary}")]
    Invalid { summary: String, patch: Box<Patch> },
}

impl SocError {
    /// Partial patch recovered before the failure
    #[must_use]
    pub fn patch(&self) -> &Patch {
        match self {
            Self::InvalidHeader { patch, .. } | Self::Invalid { patch, .. } => patch,
        }
    }

    /// Take the partial patch
    #[must_use]
    pub fn into_patch(self) -> Patch {
        match self {
            Self::InvalidHeader { patch, .. } | Self::Invalid { patch, .. } => *patch,
        }
    }

    /// All recorded error strings
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.patch().errors
    }

    /// Whether parsing stopped before reading the whole input
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidHeader { .. })
    }
}

/// Reasons raw model output is unusable before parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Nothing but whitespace
    #[error("empty input")]
    Empty,

    /// The model refused the task
    #[error("model refusal detected")]
    Refusal,

    /// Header literal absent
    #[error("missing header '{0}'")]
    MissingHeader(&'static str),

    /// Trailer literal absent
    #[error("missing trailer '{0}'")]
    MissingTrailer(&'static str),
}

/// Diff body problems
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// Line is neither diff syntax nor tolerated raw code
    #[error("malformed diff line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },
}

/// Errors loading parser configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML document could not be parsed
    #[error("invalid configuration document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias for parse operations
pub type SocResult<T> = Result<T, SocError>;
