//! Language and artifact-kind detection from file paths

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Source language of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Python,
    Go,
    JavaScript,
    TypeScript,
    Java,
    Ruby,
    Php,
    Rust,
    CSharp,
    Sql,
    Html,
    Css,
    Yaml,
    Json,
    Toml,
    Markdown,
    Unknown,
}

impl Language {
    /// File extensions for this language (without dot)
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py"],
            Language::Go => &["go"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Java => &["java"],
            Language::Ruby => &["rb"],
            Language::Php => &["php"],
            Language::Rust => &["rs"],
            Language::CSharp => &["cs"],
            Language::Sql => &["sql"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css", "scss"],
            Language::Yaml => &["yaml", "yml"],
            Language::Json => &["json"],
            Language::Toml => &["toml"],
            Language::Markdown => &["md"],
            Language::Unknown => &[],
        }
    }

    /// Detect language from an extension, with or without the leading dot
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
            .unwrap_or(Language::Unknown)
    }

    /// Detect language from a patch-relative path
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map_or(Language::Unknown, Self::from_extension)
    }

    /// Whether files in this language are compiled or interpreted code
    #[inline]
    #[must_use]
    pub fn is_code(&self) -> bool {
        !matches!(
            self,
            Language::Yaml
                | Language::Json
                | Language::Toml
                | Language::Markdown
                | Language::Html
                | Language::Css
                | Language::Unknown
        )
    }

    const ALL: [Language; 16] = [
        Language::Python,
        Language::Go,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Ruby,
        Language::Php,
        Language::Rust,
        Language::CSharp,
        Language::Sql,
        Language::Html,
        Language::Css,
        Language::Yaml,
        Language::Json,
        Language::Toml,
        Language::Markdown,
    ];
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "python",
            Language::Go => "go",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Rust => "rust",
            Language::CSharp => "csharp",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Yaml => "yaml",
            Language::Json => "json",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Role a file plays in the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Source,
    Test,
    Config,
    Migration,
    Documentation,
    Build,
}

impl ArtifactKind {
    /// Classify a path by directory and file-name conventions
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        let file_name = lower.rsplit('/').next().unwrap_or(&lower);

        if matches!(file_name, "dockerfile" | "makefile" | "go.mod" | "package.json" | "cargo.toml")
            || file_name == "requirements.txt"
        {
            return ArtifactKind::Build;
        }
        if lower.contains("/migrations/") || lower.starts_with("migrations/") {
            return ArtifactKind::Migration;
        }
        if lower.contains("/tests/")
            || lower.starts_with("tests/")
            || file_name.starts_with("test_")
            || file_name.contains("_test.")
            || file_name.contains(".test.")
            || file_name.contains(".spec.")
        {
            return ArtifactKind::Test;
        }
        match Language::from_path(&lower) {
            Language::Markdown => ArtifactKind::Documentation,
            Language::Yaml | Language::Json | Language::Toml => ArtifactKind::Config,
            _ => ArtifactKind::Source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn language_from_path() {
        assert_eq!(Language::from_path("backend/api/users.py"), Language::Python);
        assert_eq!(Language::from_path("frontend/src/App.TSX"), Language::TypeScript);
        assert_eq!(Language::from_path("backend/main.go"), Language::Go);
        assert_eq!(Language::from_path("Makefile"), Language::Unknown);
    }

    #[test]
    fn language_from_extension_accepts_dot() {
        assert_eq!(Language::from_extension(".rs"), Language::Rust);
        assert_eq!(Language::from_extension("cs"), Language::CSharp);
    }

    #[test]
    fn code_languages() {
        assert!(Language::Go.is_code());
        assert!(!Language::Yaml.is_code());
    }

    #[test]
    fn kind_classification() {
        assert_eq!(ArtifactKind::classify("backend/api/users.py"), ArtifactKind::Source);
        assert_eq!(ArtifactKind::classify("backend/tests/test_users.py"), ArtifactKind::Test);
        assert_eq!(ArtifactKind::classify("backend/users_test.go"), ArtifactKind::Test);
        assert_eq!(ArtifactKind::classify("backend/migrations/001_init.sql"), ArtifactKind::Migration);
        assert_eq!(ArtifactKind::classify("deploy/values.yaml"), ArtifactKind::Config);
        assert_eq!(ArtifactKind::classify("README.md"), ArtifactKind::Documentation);
        assert_eq!(ArtifactKind::classify("backend/Dockerfile"), ArtifactKind::Build);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Language::CSharp.to_string(), "csharp");
    }

    proptest! {
        #[test]
        fn prop_extension_case_insensitive(stem in "[a-z_]{1,12}", idx in 0usize..Language::ALL.len()) {
            let lang = Language::ALL[idx];
            if let Some(ext) = lang.extensions().first() {
                let upper = format!("{stem}.{}", ext.to_ascii_uppercase());
                prop_assert_eq!(Language::from_path(&upper), lang);
            }
        }
    }
}
