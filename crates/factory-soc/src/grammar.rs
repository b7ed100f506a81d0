//! Strict Output Contract grammar
//!
//! ```text
//! patch     = header newline filelist newline patchblock newline trailer
//! header    = "### FACTORY/1 PATCH"
//! filelist  = 1*("- file: " path newline)
//! patchblock= "```diff" newline 1*line "```"
//! trailer   = "### END"
//! ```
//!
//! Models that skip the fence and emit a bare unified diff (`--- a/...`)
//! are accepted through a fallback branch in the parser.

/// First non-blank line of every patch
pub const HEADER: &str = "### FACTORY/1 PATCH";
/// Last non-blank line of every patch
pub const TRAILER: &str = "### END";
/// Prefix of a file-list entry
pub const FILE_PREFIX: &str = "- file: ";
/// Fence opening the diff block
pub const FENCE_OPEN: &str = "```diff";
/// Fence closing the diff block
pub const FENCE_CLOSE: &str = "```";
/// Unified-diff old-file header prefix
pub const RAW_OLD_PREFIX: &str = "--- a/";
/// Unified-diff new-file header prefix
pub const RAW_NEW_PREFIX: &str = "+++ b/";

/// Structural meaning of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Header,
    Trailer,
    /// `- file: <path>` with the trimmed path
    File(&'a str),
    FenceOpen,
    FenceClose,
    /// `--- a/...` or `+++ b/...`
    RawDiffHeader,
    Other,
}

impl<'a> LineKind<'a> {
    /// Classify a line by its trimmed form
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if trimmed == HEADER {
            Self::Header
        } else if trimmed == TRAILER {
            Self::Trailer
        } else if let Some(path) = file_entry(line) {
            Self::File(path)
        } else if trimmed.starts_with(FENCE_OPEN) {
            Self::FenceOpen
        } else if trimmed == FENCE_CLOSE {
            Self::FenceClose
        } else if is_raw_diff_header(trimmed) {
            Self::RawDiffHeader
        } else {
            Self::Other
        }
    }
}

/// Path of a `- file: ` entry, if the line is one
#[must_use]
pub fn file_entry(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(FILE_PREFIX)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Whether the line opens a bare unified diff
#[inline]
#[must_use]
pub fn is_raw_diff_header(line: &str) -> bool {
    line.starts_with(RAW_OLD_PREFIX) || line.starts_with(RAW_NEW_PREFIX)
}

/// Path named by a `--- a/` header, without the `a/` prefix
#[must_use]
pub fn raw_old_path(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(RAW_OLD_PREFIX)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}
