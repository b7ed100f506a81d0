//! Cross-checks for caller-supplied overlay sets

use super::config::OverlayConfig;
use crate::types::IrSpec;

/// Advisory warnings for a set of overlays applied to a spec
///
/// Never fails. Overlay names are compared case-insensitively.
#[must_use]
pub fn validate_overlay_compatibility(
    overlays: &[String],
    spec: &IrSpec,
    config: &OverlayConfig,
) -> Vec<String> {
    let has = |name: &str| overlays.iter().any(|o| o.eq_ignore_ascii_case(name));
    let mut warnings = Vec::new();

    if has("healthcare") && has("fintech") {
        warnings.push(
            "healthcare and fintech overlays combined: ensure data separation between health and financial records"
                .to_string(),
        );
    }

    let language = spec.app.stack.backend.language.as_str();
    if has("gdpr")
        && config
            .gdpr_sensitive_languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
    {
        warnings.push(format!(
            "gdpr with a {language} backend: personal data types need careful handling (erasure, export, pseudonymisation)"
        ));
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "overlay compatibility warnings");
    }
    warnings
}
