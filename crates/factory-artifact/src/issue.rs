//! Findings reported by verification collaborators
//!
//! Static-analysis runners (a `go vet`-style checker, linters, type
//! checkers) implement [`ArtifactChecker`] and return [`Issue`] lists.
//! The front end never runs them itself; it only owns the shape.

use crate::artifact::Artifact;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue severity, ordered from least to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Category of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Syntax,
    Type,
    Lint,
    Security,
    Style,
    Other,
}

/// One finding at a source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub file: String,
    /// 1-based; 0 when the checker reports a file-level finding
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Issue {
    /// Create a file-level issue
    #[must_use]
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            file: file.into(),
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    /// Attach a source position
    #[inline]
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file, self.line, self.column, self.severity, self.message
        )
    }
}

/// A pluggable verification collaborator
pub trait ArtifactChecker: Send + Sync {
    /// Short identifier used in reports
    fn name(&self) -> &str;

    /// Whether this checker understands the artifact
    fn supports(&self, artifact: &Artifact) -> bool;

    /// Inspect artifacts and report findings
    fn check(&self, artifacts: &[Artifact]) -> Vec<Issue>;
}

/// Aggregated findings from one or more checkers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReport {
    pub issues: Vec<Issue>,
}

impl IssueReport {
    /// Run every checker over the artifacts it supports
    #[must_use]
    pub fn collect(checkers: &[&dyn ArtifactChecker], artifacts: &[Artifact]) -> Self {
        let mut issues = Vec::new();
        for checker in checkers {
            let supported: Vec<Artifact> = artifacts
                .iter()
                .filter(|a| checker.supports(a))
                .cloned()
                .collect();
            if supported.is_empty() {
                continue;
            }
            issues.extend(checker.check(&supported));
        }
        Self { issues }
    }

    /// Number of issues at the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// True when any error-level issue is present
    #[must_use]
    pub fn has_blocking(&self) -> bool {
        self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// Issues reported against one file
    pub fn for_file<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |i| i.file == file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    struct TodoChecker;

    impl ArtifactChecker for TodoChecker {
        fn name(&self) -> &str {
            "todo"
        }

        fn supports(&self, artifact: &Artifact) -> bool {
            artifact.language == Language::Go
        }

        fn check(&self, artifacts: &[Artifact]) -> Vec<Issue> {
            let mut issues = Vec::new();
            for artifact in artifacts {
                for (idx, line) in artifact.content.lines().enumerate() {
                    if let Some(col) = line.find("TODO") {
                        issues.push(
                            Issue::new(Severity::Warning, IssueKind::Lint, &artifact.path, "todo left in code")
                                .at(idx as u32 + 1, col as u32 + 1),
                        );
                    }
                }
            }
            issues
        }
    }

    struct FailChecker;

    impl ArtifactChecker for FailChecker {
        fn name(&self) -> &str {
            "fail"
        }

        fn supports(&self, _artifact: &Artifact) -> bool {
            true
        }

        fn check(&self, artifacts: &[Artifact]) -> Vec<Issue> {
            artifacts
                .iter()
                .map(|a| Issue::new(Severity::Error, IssueKind::Syntax, &a.path, "unexpected EOF"))
                .collect()
        }
    }

    #[test]
    fn collect_only_passes_supported_artifacts() {
        let artifacts = vec![
            Artifact::new("main.go", "package main\n// TODO: wire handlers\n"),
            Artifact::new("app.py", "# TODO"),
        ];
        let report = IssueReport::collect(&[&TodoChecker], &artifacts);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].file, "main.go");
        assert_eq!((report.issues[0].line, report.issues[0].column), (2, 4));
        assert!(!report.has_blocking());
    }

    #[test]
    fn blocking_and_counts() {
        let artifacts = vec![Artifact::new("main.go", "package main\n// TODO")];
        let report = IssueReport::collect(&[&TodoChecker, &FailChecker], &artifacts);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.count(Severity::Error), 1);
        assert!(report.has_blocking());
        assert_eq!(report.for_file("main.go").count(), 2);
    }

    #[test]
    fn issue_display() {
        let issue = Issue::new(Severity::Error, IssueKind::Type, "a.go", "mismatched types").at(3, 7);
        assert_eq!(issue.to_string(), "a.go:3:7: error: mismatched types");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
