//! Parsed patch

use crate::diff::{split_sections, FileSection};
use factory_artifact::{ContentHash, Language};
use serde::{Deserialize, Serialize};

/// Result of parsing model output against the contract
///
/// A patch with `valid == false` must never be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// Declared files, in declaration order, without duplicates
    pub files: Vec<String>,
    /// Diff body, trimmed
    pub content: String,
    pub valid: bool,
    /// Every contract violation, in discovery order
    pub errors: Vec<String>,
}

impl Patch {
    /// Per-file sections of the diff body
    #[must_use]
    pub fn file_sections(&self) -> Vec<FileSection> {
        split_sections(&self.content)
    }

    /// Distinct languages of the declared files, in file order
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        let mut out = Vec::new();
        for language in self.files.iter().map(|f| Language::from_path(f)) {
            if !out.contains(&language) {
                out.push(language);
            }
        }
        out
    }

    /// Content address of the diff body
    #[inline]
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        ContentHash::of_text(&self.content)
    }

    /// Whether a file was declared
    #[must_use]
    pub fn declares(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == path)
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Record a file unless already declared; returns whether it was new
    pub(crate) fn add_file(&mut self, path: &str) -> bool {
        if self.declares(path) {
            return false;
        }
        self.files.push(path.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch() -> Patch {
        Patch {
            files: vec![
                "backend/api/users.py".to_string(),
                "backend/models/user.py".to_string(),
                "frontend/src/App.tsx".to_string(),
            ],
            content: "--- a/backend/api/users.py\n+++ b/backend/api/users.py\n@@ -1 +1 @@\n-a\n+b".to_string(),
            valid: true,
            errors: Vec::new(),
        }
    }

    #[test]
    fn languages_deduplicated() {
        assert_eq!(patch().languages(), vec![Language::Python, Language::TypeScript]);
    }

    #[test]
    fn digest_tracks_content() {
        let a = patch();
        let mut b = patch();
        assert_eq!(a.digest(), b.digest());
        b.content.push_str("\n+c");
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn add_file_dedups() {
        let mut p = Patch::default();
        assert!(p.add_file("a.py"));
        assert!(!p.add_file("a.py"));
        assert_eq!(p.files, ["a.py"]);
    }

    #[test]
    fn json_contract_fields() {
        let json: serde_json::Value = serde_json::from_str(&patch().to_json().unwrap()).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["files"][0], "backend/api/users.py");
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sections_from_content() {
        let sections = patch().file_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].path, "backend/api/users.py");
    }
}
