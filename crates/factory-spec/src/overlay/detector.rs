//! Keyword-and-confidence overlay classifier

use super::config::{OverlayConfig, OverlayPattern};
use super::{OverlayDetectionResult, OverlaySuggestion, OverlayType};
use crate::error::ConfigError;
use crate::rules::compile_pattern;
use regex::Regex;
use std::collections::BTreeSet;

const DOMAIN_MATCH_WEIGHT: f64 = 0.3;
const DISTINCT_KEYWORD_BONUS: f64 = 0.3;
const SECONDARY_SIGNAL_BONUS: f64 = 0.2;
const COMPLIANCE_MATCH_WEIGHT: f64 = 0.4;
const EXPLICIT_MENTION_CONFIDENCE: f64 = 0.9;
const WARNING_CONFIDENCE: f64 = 0.6;
const DOMAIN_CONTEXT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone)]
struct CompiledOverlay {
    name: String,
    regex: Regex,
    secondary_signals: Vec<String>,
}

impl CompiledOverlay {
    fn compile(kind: &str, pattern: &OverlayPattern) -> Result<Self, ConfigError> {
        Ok(Self {
            name: pattern.name.clone(),
            regex: compile_pattern(&format!("{kind}:{}", pattern.name), &pattern.pattern)?,
            secondary_signals: pattern
                .secondary_signals
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        })
    }

    /// All matched keywords, in order of appearance
    fn matches(&self, text: &str) -> Vec<String> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Detects domain and compliance overlays in a brief
///
/// Patterns are compiled once in [`OverlayDetector::new`]; detection is a
/// pure function of the brief and safe to call from many threads.
#[derive(Debug, Clone)]
pub struct OverlayDetector {
    domains: Vec<CompiledOverlay>,
    compliance: Vec<CompiledOverlay>,
    config: OverlayConfig,
}

impl OverlayDetector {
    /// Compile the pattern library
    ///
    /// # Errors
    /// Returns error if any pattern does not compile
    pub fn new(config: OverlayConfig) -> Result<Self, ConfigError> {
        let domains = config
            .domains
            .iter()
            .map(|p| CompiledOverlay::compile("domain", p))
            .collect::<Result<Vec<_>, _>>()?;
        let compliance = config
            .compliance
            .iter()
            .map(|p| CompiledOverlay::compile("compliance", p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            domains,
            compliance,
            config,
        })
    }

    /// Detector configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Classify a brief
    #[must_use]
    pub fn detect(&self, brief: &str) -> OverlayDetectionResult {
        let text = brief.to_lowercase();
        let mut suggestions = Vec::new();

        for overlay in &self.domains {
            if let Some(s) = self.score_domain(overlay, &text) {
                suggestions.push(s);
            }
        }
        for overlay in &self.compliance {
            if let Some(s) = self.score_compliance(overlay, &text) {
                suggestions.push(s);
            }
        }

        let mut auto_apply: Vec<String> = Vec::new();
        for s in &suggestions {
            if s.confidence >= self.config.auto_apply_threshold && !auto_apply.contains(&s.name) {
                auto_apply.push(s.name.clone());
            }
        }

        let warnings = Self::warnings(&suggestions);

        tracing::debug!(
            suggestions = suggestions.len(),
            auto_apply = ?auto_apply,
            "overlay detection complete"
        );

        OverlayDetectionResult {
            suggestions,
            auto_apply,
            warnings,
        }
    }

    fn score_domain(&self, overlay: &CompiledOverlay, text: &str) -> Option<OverlaySuggestion> {
        let matches = overlay.matches(text);
        if matches.is_empty() {
            return None;
        }
        let keywords: BTreeSet<String> = matches.iter().cloned().collect();

        let mut confidence = DOMAIN_MATCH_WEIGHT * matches.len() as f64;
        if keywords.len() >= 2 {
            confidence += DISTINCT_KEYWORD_BONUS;
        }
        let secondary = overlay
            .secondary_signals
            .iter()
            .any(|signal| text.contains(signal.as_str()));
        if secondary {
            confidence += SECONDARY_SIGNAL_BONUS;
        }
        let confidence = round_confidence(confidence);
        if confidence < self.config.min_confidence {
            return None;
        }

        let reason = format!(
            "{} {} keyword match(es): {}",
            matches.len(),
            overlay.name,
            join(&keywords)
        );
        Some(OverlaySuggestion {
            name: overlay.name.clone(),
            overlay_type: OverlayType::Domain,
            confidence,
            reason,
            keywords,
        })
    }

    fn score_compliance(&self, overlay: &CompiledOverlay, text: &str) -> Option<OverlaySuggestion> {
        let matches = overlay.matches(text);
        if matches.is_empty() {
            return None;
        }
        let keywords: BTreeSet<String> = matches.iter().cloned().collect();

        let explicit = matches.iter().any(|m| m.contains(overlay.name.as_str()));
        let confidence = if explicit {
            EXPLICIT_MENTION_CONFIDENCE
        } else {
            round_confidence(COMPLIANCE_MATCH_WEIGHT * matches.len() as f64)
        };
        if confidence < self.config.min_confidence {
            return None;
        }

        let reason = if explicit {
            format!("{} explicitly mentioned", overlay.name)
        } else {
            format!("{} related terms: {}", overlay.name, join(&keywords))
        };
        Some(OverlaySuggestion {
            name: overlay.name.clone(),
            overlay_type: OverlayType::Compliance,
            confidence,
            reason,
            keywords,
        })
    }

    fn warnings(suggestions: &[OverlaySuggestion]) -> Vec<String> {
        let mut warnings = Vec::new();

        let strong_compliance: Vec<&OverlaySuggestion> = suggestions
            .iter()
            .filter(|s| s.overlay_type == OverlayType::Compliance && s.confidence > WARNING_CONFIDENCE)
            .collect();
        let has_domain_context = suggestions
            .iter()
            .any(|s| s.overlay_type == OverlayType::Domain && s.confidence > DOMAIN_CONTEXT_CONFIDENCE);

        if strong_compliance.len() > 2 {
            let names: Vec<&str> = strong_compliance.iter().map(|s| s.name.as_str()).collect();
            warnings.push(format!(
                "multiple compliance overlays, verify compatibility: {}",
                names.join(", ")
            ));
        }
        if !has_domain_context {
            for s in &strong_compliance {
                warnings.push(format!(
                    "compliance without domain context: '{}' detected but no domain overlay is confident",
                    s.name
                ));
            }
        }
        warnings
    }
}

impl Default for OverlayDetector {
    /// Detector over the built-in pattern library
    ///
    /// # Panics
    /// Panics if a built-in overlay pattern fails to compile
    fn default() -> Self {
        Self::new(OverlayConfig::default()).expect("built-in overlay patterns compile")
    }
}

/// Clamp to [0, 1] and round to two decimals
pub(crate) fn round_confidence(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

fn join(keywords: &BTreeSet<String>) -> String {
    keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> OverlayDetector {
        OverlayDetector::default()
    }

    fn find<'a>(result: &'a OverlayDetectionResult, name: &str) -> Option<&'a OverlaySuggestion> {
        result.suggestions.iter().find(|s| s.name == name)
    }

    #[test]
    fn hipaa_brief_auto_applies_healthcare_and_hipaa() {
        let result = detector().detect("Create a HIPAA-compliant patient management system with medical records");
        let healthcare = find(&result, "healthcare").unwrap();
        assert_eq!(healthcare.overlay_type, OverlayType::Domain);
        assert!((healthcare.confidence - 1.0).abs() < f64::EPSILON);

        let hipaa = find(&result, "hipaa").unwrap();
        assert_eq!(hipaa.overlay_type, OverlayType::Compliance);
        assert!((hipaa.confidence - 0.9).abs() < f64::EPSILON);
        assert!(hipaa.keywords.contains("hipaa"));
        assert!(hipaa.keywords.contains("medical records"));

        assert!(result.auto_apply.contains(&"healthcare".to_string()));
        assert!(result.auto_apply.contains(&"hipaa".to_string()));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn single_domain_keyword_scores_base_weight() {
        let result = detector().detect("A tool that tracks loans");
        let fintech = find(&result, "fintech").unwrap();
        assert!((fintech.confidence - 0.3).abs() < 1e-9);
        assert!(result.auto_apply.is_empty());
    }

    #[test]
    fn secondary_signal_adds_bonus() {
        // "bank" matches once and is also a secondary signal
        let result = detector().detect("An app for my bank");
        let fintech = find(&result, "fintech").unwrap();
        assert!((fintech.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_keyword_counts_each_match_but_not_distinct_bonus() {
        let result = detector().detect("payment payment");
        let fintech = find(&result, "fintech").unwrap();
        assert_eq!(fintech.keywords.len(), 1);
        assert!((fintech.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn compliance_without_explicit_mention_scales_by_matches() {
        let result = detector().detect("store personal data with consent tracking");
        let gdpr = find(&result, "gdpr").unwrap();
        assert!((gdpr.confidence - 0.8).abs() < 1e-9);
        assert!(result.auto_apply.contains(&"gdpr".to_string()));
    }

    #[test]
    fn explicit_compliance_mention_forces_point_nine() {
        let result = detector().detect("must follow GDPR, privacy, personal data, consent rules");
        let gdpr = find(&result, "gdpr").unwrap();
        assert!((gdpr.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn compliance_without_domain_context_warns() {
        let result = detector().detect("A GDPR ready newsletter tool");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("compliance without domain context")));
    }

    #[test]
    fn many_compliance_overlays_warn() {
        let result = detector().detect("A banking platform that is PCI, HIPAA and GDPR compliant");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("multiple compliance overlays, verify compatibility")));
    }

    #[test]
    fn no_matches_yields_empty_result() {
        let result = detector().detect("A command line tool to rename files");
        assert!(result.suggestions.is_empty());
        assert!(result.auto_apply.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let brief = String::from("Online SHOP with Cart");
        let _ = detector().detect(&brief);
        assert_eq!(brief, "Online SHOP with Cart");
    }

    #[test]
    fn substituted_library() {
        let config = OverlayConfig::new()
            .with_domains(vec![OverlayPattern::new("gaming", r"\b(game|games|gaming)\b")])
            .with_compliance(vec![]);
        let detector = OverlayDetector::new(config).unwrap();
        let result = detector.detect("a gaming site with games");
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.auto_apply, vec!["gaming".to_string()]);
    }

    #[test]
    fn invalid_pattern_rejected() {
        let config = OverlayConfig::new().with_domains(vec![OverlayPattern::new("bad", "(")]);
        assert!(OverlayDetector::new(config).is_err());
    }

    #[test]
    fn round_confidence_clamps() {
        assert!((round_confidence(1.7) - 1.0).abs() < f64::EPSILON);
        assert!(round_confidence(-0.2).abs() < f64::EPSILON);
        assert!((round_confidence(0.8999999) - 0.9).abs() < f64::EPSILON);
    }
}
