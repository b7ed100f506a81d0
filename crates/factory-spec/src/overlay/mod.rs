//! Overlay detection
//!
//! An overlay is a named bundle of extra requirements (a domain such as
//! `fintech` or a compliance regime such as `hipaa`) applied on top of a
//! compiled specification. The detector scores each overlay against a
//! brief; high-confidence suggestions are auto-applied by the compiler.

mod compat;
mod config;
mod detector;

pub use compat::validate_overlay_compatibility;
pub use config::{OverlayConfig, OverlayPattern};
pub use detector::OverlayDetector;

pub(crate) use detector::round_confidence;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Overlay family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayType {
    Domain,
    Compliance,
}

impl fmt::Display for OverlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domain => "domain",
            Self::Compliance => "compliance",
        })
    }
}

/// One scored overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySuggestion {
    pub name: String,
    #[serde(rename = "type")]
    pub overlay_type: OverlayType,
    /// Confidence in [0, 1], two decimals
    pub confidence: f64,
    pub reason: String,
    /// Distinct matched keywords
    pub keywords: BTreeSet<String>,
}

impl OverlaySuggestion {
    /// Whether confidence reaches the threshold
    #[inline]
    #[must_use]
    pub fn meets(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }
}

/// Detector output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayDetectionResult {
    /// All suggestions at or above the minimum confidence, domains first
    pub suggestions: Vec<OverlaySuggestion>,
    /// Overlay names to apply without asking
    pub auto_apply: Vec<String>,
    pub warnings: Vec<String>,
}

impl OverlayDetectionResult {
    /// Names of suggestions at or above the threshold, in suggestion order
    #[must_use]
    pub fn names_at_least(&self, threshold: f64) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for s in self.suggestions.iter().filter(|s| s.meets(threshold)) {
            if !names.contains(&s.name) {
                names.push(s.name.clone());
            }
        }
        names
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str, confidence: f64) -> OverlaySuggestion {
        OverlaySuggestion {
            name: name.to_string(),
            overlay_type: OverlayType::Domain,
            confidence,
            reason: String::new(),
            keywords: BTreeSet::new(),
        }
    }

    #[test]
    fn names_at_least_filters_and_dedups() {
        let result = OverlayDetectionResult {
            suggestions: vec![
                suggestion("fintech", 0.9),
                suggestion("ecommerce", 0.3),
                suggestion("fintech", 0.6),
            ],
            ..Default::default()
        };
        assert_eq!(result.names_at_least(0.5), vec!["fintech".to_string()]);
    }

    #[test]
    fn suggestion_serializes_type_tag() {
        let json = serde_json::to_value(suggestion("fintech", 0.5)).unwrap();
        assert_eq!(json["type"], "domain");
        assert_eq!(OverlayType::Compliance.to_string(), "compliance");
    }
}
