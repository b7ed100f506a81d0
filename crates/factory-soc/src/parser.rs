//! Strict Output Contract parser
//!
//! Single forward pass over the trimmed input:
//! 1. Scan every line for prose markers (recorded, not fatal)
//! 2. Drive [`transition`] line by line, applying its effects
//! 3. Check the end state, fence, file list and diff body
//!
//! Everything except a bad header is collected, so one call returns the
//! full list of violations.

use crate::contamination::{is_refusal, prose_lines, DEFAULT_PROSE_MARKERS, DEFAULT_REFUSAL_PHRASES};
use crate::diff::validate_diff;
use crate::error::{ConfigError, InputError, SocError, SocResult};
use crate::grammar::{file_entry, raw_old_path, HEADER, TRAILER};
use crate::patch::Patch;
use crate::policy::PathPolicy;
use crate::state::{transition, Effect, ParserState};
use serde::{Deserialize, Serialize};

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocConfig {
    /// Path prefixes a patch may touch; empty allows everything
    pub allowed_prefixes: Vec<String>,
    /// Line prefixes that mark conversational prose
    pub prose_markers: Vec<String>,
    /// Phrases that mark a model refusal
    pub refusal_phrases: Vec<String>,
    /// Reject `..` segments and absolute paths regardless of prefixes
    pub reject_parent_segments: bool,
}

impl SocConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With allowed path prefixes
    #[must_use]
    pub fn with_allowed_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// With traversal hardening
    #[inline]
    #[must_use]
    pub fn with_reject_parent_segments(mut self, reject: bool) -> Self {
        self.reject_parent_segments = reject;
        self
    }

    /// Load from a TOML document; missing keys fall back to defaults
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this shape
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for SocConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: Vec::new(),
            prose_markers: DEFAULT_PROSE_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            refusal_phrases: DEFAULT_REFUSAL_PHRASES.iter().map(|s| (*s).to_string()).collect(),
            reject_parent_segments: false,
        }
    }
}

/// Parses and validates model output against the contract
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct SocParser {
    policy: PathPolicy,
    prose_markers: Vec<String>,
    refusal_phrases: Vec<String>,
}

impl SocParser {
    /// Create parser from configuration
    #[must_use]
    pub fn new(config: SocConfig) -> Self {
        let lower = |v: Vec<String>| -> Vec<String> { v.into_iter().map(|s| s.to_lowercase()).collect() };
        Self {
            policy: PathPolicy::new(config.allowed_prefixes)
                .with_reject_escapes(config.reject_parent_segments),
            prose_markers: lower(config.prose_markers),
            refusal_phrases: lower(config.refusal_phrases),
        }
    }

    /// Parser with default markers and the given allow-list
    #[must_use]
    pub fn with_allow_list<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SocConfig::new().with_allowed_prefixes(prefixes))
    }

    /// Path policy in force
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    /// Whether `path` has an allowed prefix (always true with no allow-list)
    #[inline]
    #[must_use]
    pub fn is_path_allowed(&self, path: &str) -> bool {
        self.policy.is_allowed(path)
    }

    /// Whether the text contains a refusal phrase
    #[inline]
    #[must_use]
    pub fn is_refusal(&self, text: &str) -> bool {
        is_refusal(text, &self.refusal_phrases)
    }

    /// Cheap pre-check before [`SocParser::parse`]
    ///
    /// # Errors
    /// Returns the first reason the input cannot be a patch
    pub fn validate_input(&self, text: &str) -> Result<(), InputError> {
        if text.trim().is_empty() {
            return Err(InputError::Empty);
        }
        if self.is_refusal(text) {
            tracing::warn!("model refusal detected");
            return Err(InputError::Refusal);
        }
        if !text.contains(HEADER) {
            return Err(InputError::MissingHeader(HEADER));
        }
        if !text.contains(TRAILER) {
            return Err(InputError::MissingTrailer(TRAILER));
        }
        Ok(())
    }

    /// Parse model output into a [`Patch`]
    ///
    /// # Errors
    /// Returns [`SocError::InvalidHeader`] when the first non-blank line is
    /// not the header, and [`SocError::Invalid`] with every violation when
    /// the input breaks the contract elsewhere. Both carry the partial patch.
    pub fn parse(&self, input: &str) -> SocResult<Patch> {
        let input = input.trim();
        let mut patch = Patch::default();

        for (number, line) in prose_lines(input, &self.prose_markers) {
            patch.errors.push(format!("prose detected at line {number}: '{line}'"));
        }

        let mut state = ParserState::default();
        let mut diff_open = false;
        let mut diff: Vec<&str> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let number = index + 1;
            let line = raw.trim_end_matches('\r');
            let (next, effects) = transition(state, line);
            if next != state {
                tracing::debug!(from = %state, to = %next, line = number, "soc state transition");
            }

            for effect in effects {
                match effect {
                    Effect::RecordFile(path) => self.record_file(&mut patch, path),
                    Effect::OpenDiff => diff_open = true,
                    Effect::CloseDiff => diff_open = false,
                    Effect::HarvestRawFiles => {
                        tracing::debug!(line = number, "bare unified diff, harvesting file references");
                        self.harvest_raw_files(&mut patch, input);
                    }
                    Effect::AppendDiff(text) => diff.push(text),
                    Effect::Fatal(reason) => {
                        let found = line.trim().to_string();
                        patch
                            .errors
                            .push(format!("{reason} at line {number}: expected '{HEADER}', got '{found}'"));
                        patch.valid = false;
                        tracing::warn!(line = number, "soc parse aborted: invalid header");
                        return Err(SocError::InvalidHeader {
                            line: number,
                            expected: HEADER,
                            found,
                            patch: Box::new(patch),
                        });
                    }
                    Effect::Unexpected(what) => {
                        patch.errors.push(format!("line {number}: {what}: '{}'", line.trim()));
                    }
                }
            }
            state = next;
        }

        if state != ParserState::Done {
            patch
                .errors
                .push(format!("incomplete patch: ended in state {state}, missing '{TRAILER}'"));
        }
        if diff_open {
            patch.errors.push("unclosed diff block".to_string());
        }
        if patch.files.is_empty() {
            patch.errors.push("no files specified".to_string());
        }

        let joined = diff.join("\n");
        let content = joined.trim_start_matches(['\n', '\r']).trim_end();
        if content.is_empty() {
            patch.errors.push("empty diff content".to_string());
        } else {
            if let Err(e) = validate_diff(content) {
                patch.errors.push(e.to_string());
            }
            patch.content = content.to_string();
        }

        patch.valid = patch.errors.is_empty();
        if patch.valid {
            tracing::info!(
                files = patch.files.len(),
                digest = %patch.digest().short(),
                "soc patch accepted"
            );
            Ok(patch)
        } else {
            let summary = patch.errors.join("; ");
            tracing::warn!(errors = patch.errors.len(), "soc patch rejected");
            Err(SocError::Invalid {
                summary,
                patch: Box::new(patch),
            })
        }
    }

    fn record_file(&self, patch: &mut Patch, path: &str) {
        if !patch.add_file(path) {
            return;
        }
        if let Some(reason) = self.policy.violation(path) {
            tracing::warn!(%path, "patch touches disallowed path");
            patch.errors.push(reason);
        }
    }

    fn harvest_raw_files(&self, patch: &mut Patch, input: &str) {
        for line in input.lines() {
            if let Some(path) = file_entry(line).or_else(|| raw_old_path(line)) {
                self.record_file(patch, path);
            }
        }
    }
}

impl Default for SocParser {
    fn default() -> Self {
        Self::new(SocConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "### FACTORY/1 PATCH
- file: backend/api/users.py
- file: backend/models/user.py
```diff
--- a/backend/api/users.py
+++ b/backend/api/users.py
@@ -1,3 +1,4 @@
 from fastapi import APIRouter
+from backend.models.user import User
 router = APIRouter()
```
### END";

    fn parser() -> SocParser {
        SocParser::with_allow_list(["backend/", "frontend/", "api/"])
    }

    #[test]
    fn valid_patch() {
        let patch = parser().parse(VALID).unwrap();
        assert!(patch.valid);
        assert_eq!(patch.files, ["backend/api/users.py", "backend/models/user.py"]);
        assert!(patch.content.starts_with("--- a/backend/api/users.py"));
        assert!(patch.content.ends_with(" router = APIRouter()"));
        assert!(patch.errors.is_empty());
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        let input = format!("\n\n   {VALID}\n\n");
        assert!(parser().parse(&input).is_ok());
    }

    #[test]
    fn crlf_line_endings() {
        let input = VALID.replace('\n', "\r\n");
        let patch = parser().parse(&input).unwrap();
        assert_eq!(patch.files.len(), 2);
        assert!(!patch.content.contains('\r'));
    }

    #[test]
    fn prose_after_header() {
        let input = VALID.replace(
            "### FACTORY/1 PATCH\n",
            "### FACTORY/1 PATCH\nHere's the patch you asked for.\n",
        );
        let err = parser().parse(&input).unwrap_err();
        assert!(!err.is_fatal());
        assert!(!err.patch().valid);
        assert!(err.errors().iter().any(|e| e.contains("prose detected")));
    }

    #[test]
    fn prose_before_header_is_fatal() {
        let err = parser()
            .parse("Sure, here is the code\n### FACTORY/1 PATCH\n### END")
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, SocError::InvalidHeader { line: 1, .. }));
        assert!(err.errors()[0].starts_with("prose detected at line 1"));
        assert!(err.errors()[1].starts_with("invalid header at line 1"));
    }

    #[test]
    fn disallowed_path_is_recorded_and_parsing_continues() {
        let input = VALID.replace("- file: backend/models/user.py", "- file: ../../../etc/passwd");
        let err = parser().parse(&input).unwrap_err();
        let patch = err.into_patch();
        assert!(!patch.valid);
        assert_eq!(patch.files, ["backend/api/users.py", "../../../etc/passwd"]);
        assert_eq!(patch.errors.len(), 1);
        assert!(patch.errors[0].starts_with("path not allowed: ../../../etc/passwd"));
        assert!(!patch.content.is_empty());
    }

    #[test]
    fn unclosed_fence_before_trailer() {
        let input = VALID.replace("```\n### END", "### END");
        let err = parser().parse(&input).unwrap_err();
        assert_eq!(err.errors(), ["unclosed diff block"]);
    }

    #[test]
    fn missing_trailer() {
        let input = VALID.replace("\n### END", "");
        let err = parser().parse(&input).unwrap_err();
        assert!(err.errors()[0].starts_with("incomplete patch"));
    }

    #[test]
    fn all_structural_errors_collected() {
        let err = parser().parse("### FACTORY/1 PATCH\n```diff").unwrap_err();
        let errors = err.errors();
        assert!(errors[0].starts_with("incomplete patch"));
        assert_eq!(&errors[1..], ["unclosed diff block", "no files specified", "empty diff content"]);
        assert!(err.to_string().contains("no files specified; empty diff content"));
    }

    #[test]
    fn stray_line_in_file_list() {
        let input = VALID.replace("- file: backend/models/user.py", "* backend/models/user.py");
        let err = parser().parse(&input).unwrap_err();
        assert_eq!(
            err.errors(),
            ["line 3: expected file list or diff start: '* backend/models/user.py'"]
        );
    }

    #[test]
    fn content_after_trailer() {
        let input = format!("{VALID}\nLet me know if you need anything else");
        let err = parser().parse(&input).unwrap_err();
        assert!(err.errors().iter().any(|e| e.contains("prose detected")));
        assert!(err
            .errors()
            .iter()
            .any(|e| e.contains("unexpected content after trailer")));
    }

    #[test]
    fn malformed_diff_line() {
        let input = "### FACTORY/1 PATCH\n- file: backend/a.py\n```diff\n@@ -0,0 +1 @@\nprint('hi')\n```\n### END";
        let err = parser().parse(input).unwrap_err();
        assert_eq!(err.errors(), ["malformed diff line 2: 'print('hi')'"]);
    }

    #[test]
    fn raw_diff_fallback_harvests_all_files() {
        let input = "### FACTORY/1 PATCH
- file: backend/a.py
--- a/backend/a.py
+++ b/backend/a.py
@@ -1 +1 @@
-x = 1
+x = 2
--- a/backend/b.py
+++ b/backend/b.py
def f():
    return 1
### END";
        let patch = parser().parse(input).unwrap();
        assert_eq!(patch.files, ["backend/a.py", "backend/b.py"]);
        assert!(patch.content.starts_with("--- a/backend/a.py"));
        assert!(patch.content.ends_with("    return 1"));
        assert_eq!(patch.file_sections().len(), 2);
    }

    #[test]
    fn raw_diff_fallback_checks_policy() {
        let input = "### FACTORY/1 PATCH\n--- a/secrets/key.pem\n+++ b/secrets/key.pem\n@@ -1 +1 @@\n-a\n+b\n### END";
        let err = parser().parse(input).unwrap_err();
        assert_eq!(err.patch().files, ["secrets/key.pem"]);
        assert!(err.errors()[0].starts_with("path not allowed: secrets/key.pem"));
    }

    #[test]
    fn no_allow_list_allows_all() {
        let parser = SocParser::default();
        assert!(parser.is_path_allowed("../../../etc/passwd"));
        let input = VALID.replace("backend/models/user.py", "anywhere/else.py");
        assert!(parser.parse(&input).is_ok());
    }

    #[test]
    fn parent_segment_hardening() {
        let parser = SocParser::new(
            SocConfig::new()
                .with_allowed_prefixes(["backend/"])
                .with_reject_parent_segments(true),
        );
        let input = VALID.replace("backend/models/user.py", "backend/../../etc/passwd");
        let err = parser.parse(&input).unwrap_err();
        assert!(err.errors()[0].contains("escapes project root"));
        assert!(parser.is_path_allowed("backend/../../etc/passwd"));
    }

    #[test]
    fn refusal_and_input_precheck() {
        let parser = parser();
        let text = "I cannot help you with this request.";
        assert!(parser.is_refusal(text));
        assert_eq!(parser.validate_input(text), Err(InputError::Refusal));
        assert_eq!(parser.validate_input("  "), Err(InputError::Empty));
        assert_eq!(
            parser.validate_input("### FACTORY/1 PATCH\n- file: a"),
            Err(InputError::MissingTrailer(TRAILER))
        );
        assert_eq!(
            parser.validate_input("- file: a\n### END"),
            Err(InputError::MissingHeader(HEADER))
        );
        assert_eq!(parser.validate_input(VALID), Ok(()));
    }

    #[test]
    fn config_from_toml() {
        let config = SocConfig::from_toml_str(
            r#"
            allowed_prefixes = ["src/"]
            refusal_phrases = ["NOPE"]
            "#,
        )
        .unwrap();
        assert_eq!(config.allowed_prefixes, ["src/"]);
        assert!(!config.prose_markers.is_empty());
        let parser = SocParser::new(config);
        assert!(parser.is_refusal("nope, not doing that"));
        assert!(!parser.is_path_allowed("backend/x"));
    }

    #[test]
    fn parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SocParser>();
    }
}
