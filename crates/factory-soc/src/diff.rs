//! Diff body validation and splitting

use crate::error::DiffError;
use crate::grammar::{is_raw_diff_header, RAW_NEW_PREFIX, RAW_OLD_PREFIX};
use serde::{Deserialize, Serialize};

/// Git extended header lines accepted verbatim
const EXTENDED_HEADERS: &[&str] = &[
    "diff --git ",
    "index ",
    "\\ No newline",
    "new file mode",
    "deleted file mode",
    "similarity index",
    "rename from",
    "rename to",
    "old mode",
    "new mode",
];

/// Whether a line is unified-diff syntax
#[must_use]
pub fn is_diff_line(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("---")
        || line.starts_with("+++")
        || line.starts_with("@@")
        || line.starts_with('+')
        || line.starts_with('-')
        || line.starts_with(' ')
        || EXTENDED_HEADERS.iter().any(|h| line.starts_with(h))
}

/// Validate a diff body
///
/// Every line must be unified-diff syntax, except that once a `--- a/` or
/// `+++ b/` header has been seen, raw code lines are tolerated.
///
/// # Errors
/// Returns the first malformed line
pub fn validate_diff(content: &str) -> Result<(), DiffError> {
    let mut seen_file_header = false;
    for (index, line) in content.lines().enumerate() {
        if is_raw_diff_header(line) {
            seen_file_header = true;
            continue;
        }
        if is_diff_line(line) || seen_file_header {
            continue;
        }
        return Err(DiffError::MalformedLine {
            line: index + 1,
            content: line.to_string(),
        });
    }
    Ok(())
}

/// The part of a diff that touches one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSection {
    /// Target path (`+++ b/` header, else `--- a/`)
    pub path: String,
    /// Section text including its headers
    pub content: String,
}

#[derive(Default)]
struct SectionBuilder {
    path: Option<String>,
    lines: Vec<String>,
    has_hunk: bool,
}

impl SectionBuilder {
    fn finish(self, out: &mut Vec<FileSection>) {
        if let Some(path) = self.path {
            out.push(FileSection {
                path,
                content: self.lines.join("\n"),
            });
        }
    }
}

/// Split a diff body into per-file sections
///
/// Sections start at `diff --git` or at a `---` header following a hunk.
/// The path comes from `+++ b/`, falling back to `--- a/` for deleted
/// files. Text before the first header and sections naming neither are
/// dropped.
#[must_use]
pub fn split_sections(content: &str) -> Vec<FileSection> {
    let mut sections = Vec::new();
    let mut current: Option<SectionBuilder> = None;

    for line in content.lines() {
        let starts_section = line.starts_with("diff --git ")
            || (line.starts_with("--- ") && current.as_ref().map_or(true, |c| c.has_hunk));
        if starts_section {
            if let Some(done) = current.take() {
                done.finish(&mut sections);
            }
            current = Some(SectionBuilder::default());
        }

        let Some(section) = current.as_mut() else {
            continue;
        };
        if let Some(path) = line.strip_prefix(RAW_OLD_PREFIX) {
            if section.path.is_none() {
                section.path = Some(path.trim().to_string());
            }
        } else if let Some(path) = line.strip_prefix(RAW_NEW_PREFIX) {
            section.path = Some(path.trim().to_string());
        } else if line.starts_with("@@") {
            section.has_hunk = true;
        }
        section.lines.push(line.to_string());
    }

    if let Some(done) = current {
        done.finish(&mut sections);
    }
    sections
}
