//! Overlay pattern library

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One overlay's keyword pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayPattern {
    /// Overlay name (e.g. `fintech`, `hipaa`)
    pub name: String,
    /// Case-insensitive, word-bounded pattern
    pub pattern: String,
    /// Substrings that add the secondary-signal bonus (domains only)
    #[serde(default)]
    pub secondary_signals: Vec<String>,
}

impl OverlayPattern {
    /// Create pattern without secondary signals
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            secondary_signals: Vec::new(),
        }
    }

    /// With secondary signals
    #[must_use]
    pub fn with_secondary_signals(mut self, signals: &[&str]) -> Self {
        self.secondary_signals = signals.iter().map(|s| (*s).to_string()).collect();
        self
    }
}

/// Overlay detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub domains: Vec<OverlayPattern>,
    pub compliance: Vec<OverlayPattern>,
    /// Suggestions below this confidence are discarded
    pub min_confidence: f64,
    /// Suggestions at or above this confidence are auto-applied
    pub auto_apply_threshold: f64,
    /// Lower bound for the compiler's suggested list
    pub suggest_threshold: f64,
    /// Backend languages that need extra care for personal data under GDPR
    pub gdpr_sensitive_languages: Vec<String>,
}

impl OverlayConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With domain patterns
    #[inline]
    #[must_use]
    pub fn with_domains(mut self, domains: Vec<OverlayPattern>) -> Self {
        self.domains = domains;
        self
    }

    /// With compliance patterns
    #[inline]
    #[must_use]
    pub fn with_compliance(mut self, compliance: Vec<OverlayPattern>) -> Self {
        self.compliance = compliance;
        self
    }

    /// Load from a TOML document
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this shape
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            domains: vec![
                OverlayPattern::new(
                    "fintech",
                    r"\b(fintech|payments?|banking|bank|finance|financial|transactions?|money|wallets?|credit|debit|loans?|investments?|trading|crypto|blockchain)\b",
                )
                .with_secondary_signals(&["bank", "financial", "fintech"]),
                OverlayPattern::new(
                    "healthcare",
                    r"\b(healthcare|health|medical|patients?|hospitals?|clinics?|clinical|doctors?|nurses?|diagnosis|treatment|prescriptions?|ehr|emr)\b",
                )
                .with_secondary_signals(&["patient", "medical", "clinical"]),
                OverlayPattern::new(
                    "ecommerce",
                    r"\b(ecommerce|e-commerce|shop|shopping|cart|checkout|products?|catalog|inventory|orders?|store|marketplace|retail)\b",
                )
                .with_secondary_signals(&["ecommerce", "e-commerce", "online store", "shopping cart"]),
            ],
            compliance: vec![
                OverlayPattern::new(
                    "pci",
                    r"\b(pci|pci-dss|pci dss|credit cards?|payment cards?|cardholder|card data)\b",
                ),
                OverlayPattern::new(
                    "hipaa",
                    r"\b(hipaa|phi|protected health information|medical records?|patient data|health information)\b",
                ),
                OverlayPattern::new(
                    "gdpr",
                    r"\b(gdpr|privacy|personal data|data protection|consent|right to be forgotten|eu citizens|european union)\b",
                ),
            ],
            min_confidence: 0.3,
            auto_apply_threshold: 0.8,
            suggest_threshold: 0.5,
            gdpr_sensitive_languages: vec!["go".to_string()],
        }
    }
}
