//! Error types for the specification compiler
//!
//! Compilation has a single hard failure (an empty brief). Everything
//! else a brief can get wrong is reported as a warning or question on the
//! result. Configuration problems surface when a compiler is constructed.

/// Errors from compiling a brief
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Brief is empty or whitespace only
    #[error("empty brief: nothing to compile")]
    EmptyBrief,

    /// Compiler could not be built from its configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CompileError {
    /// Whether the error is caused by the caller's input
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyBrief)
    }
}

/// Errors building rule tables or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A pattern in a rule table does not compile
    #[error("invalid pattern for '{name}': {source}")]
    InvalidPattern {
        /// Rule or table entry the pattern belongs to
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A category string does not name a known value
    #[error("unknown {kind} '{value}' in rule table")]
    UnknownCategory {
        /// What the category should have been (e.g. "app type")
        kind: &'static str,
        /// The offending value
        value: String,
    },

    /// TOML document could not be parsed
    #[error("invalid configuration document: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create invalid pattern error
    pub fn invalid_pattern(name: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            name: name.into(),
            source,
        }
    }
}

/// Result alias for compiler operations
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_brief_display() {
        assert_eq!(CompileError::EmptyBrief.to_string(), "empty brief: nothing to compile");
        assert!(CompileError::EmptyBrief.is_input_error());
    }

    #[test]
    fn config_error_conversion() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err: CompileError = ConfigError::invalid_pattern("domain:fintech", regex_err).into();
        assert!(matches!(err, CompileError::Config(ConfigError::InvalidPattern { .. })));
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("domain:fintech"));
    }
}
