//! Post-apply file artifacts
//!
//! An [`Artifact`] is what a verification collaborator sees once a patch
//! has been applied: a path, its language and role, and the full file text.

use crate::hash::ContentHash;
use crate::language::{ArtifactKind, Language};
use serde::{Deserialize, Serialize};

/// A single generated file handed to checkers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Project-relative path
    pub path: String,
    /// Detected language
    pub language: Language,
    /// Role in the project
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Full file content
    pub content: String,
}

impl Artifact {
    /// Create artifact, detecting language and kind from the path
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            language: Language::from_path(&path),
            kind: ArtifactKind::classify(&path),
            path,
            content: content.into(),
        }
    }

    /// Override the detected language
    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Override the detected kind
    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: ArtifactKind) -> Self {
        self.kind = kind;
        self
    }

    /// Digest of the file content
    #[inline]
    #[must_use]
    pub fn hash(&self) -> ContentHash {
        ContentHash::of_text(&self.content)
    }

    /// Number of lines in the content
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}
