//! Confidence, completeness and compile warnings

use crate::overlay::round_confidence;
use crate::types::IrSpec;

const BASE_CONFIDENCE: f64 = 0.5;
const SHORT_BRIEF_CHARS: usize = 50;
const COMPLETENESS_TOTAL_WEIGHT: f64 = 10.0;
const LOW_CONFIDENCE: f64 = 0.6;

/// Confidence in [0, 1] for an assembled spec
///
/// `brief_chars` is the character count of the trimmed brief.
#[must_use]
pub fn confidence(spec: &IrSpec, brief_chars: usize, default_domain: &str) -> f64 {
    let mut score = BASE_CONFIDENCE;
    if spec.app.features.len() > 2 {
        score += 0.1;
    }
    if spec.app.domain != default_domain {
        score += 0.1;
    }
    if !spec.data.entities.is_empty() {
        score += 0.15;
    }
    if spec.api.endpoints.len() > 5 {
        score += 0.1;
    }
    if brief_chars < SHORT_BRIEF_CHARS {
        score -= 0.2;
    }
    round_confidence(score)
}

/// Completeness in [0, 1]: weighted checks over the spec sections
#[must_use]
pub fn completeness(spec: &IrSpec, placeholder_name: &str) -> f64 {
    let checks: [(bool, f64); 9] = [
        (!spec.app.name.is_empty() && spec.app.name != placeholder_name, 1.0),
        (!spec.app.features.is_empty(), 1.0),
        (!spec.data.entities.is_empty(), 1.5),
        (!spec.api.endpoints.is_empty(), 1.5),
        (!spec.app.stack.backend.language.is_empty(), 1.0),
        (!spec.app.stack.database.kind.is_empty(), 1.0),
        (!spec.non_functionals.security.auth_methods.is_empty(), 1.0),
        (!spec.ops.environments.is_empty(), 1.0),
        (!spec.acceptance.is_empty(), 1.0),
    ];
    let earned: f64 = checks.iter().filter(|(ok, _)| *ok).map(|(_, w)| w).sum();
    round_confidence(earned / COMPLETENESS_TOTAL_WEIGHT)
}

/// Compile warnings, each check independent
#[must_use]
pub fn warnings(spec: &IrSpec, default_domain: &str, only_generic_features: bool) -> Vec<String> {
    let mut warnings = Vec::new();
    let confidence = spec.metadata.confidence;
    if confidence < LOW_CONFIDENCE {
        warnings.push(format!(
            "low confidence ({confidence:.2}): brief may be too vague, consider adding detail"
        ));
    }
    if spec.data.entities.is_empty() {
        warnings.push("no entities detected: data model and api are empty".to_string());
    }
    if only_generic_features {
        warnings.push("only generic crud features detected".to_string());
    }
    if spec.app.domain == default_domain {
        warnings.push(format!("generic domain: no industry keywords detected, using '{default_domain}'"));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SpecificationCompiler;

    fn compiled(brief: &str) -> IrSpec {
        SpecificationCompiler::default().compile(brief).unwrap().spec
    }

    #[test]
    fn short_vague_brief_scores_low() {
        let spec = compiled("a tool");
        assert!((confidence(&spec, 6, "general") - 0.3).abs() < f64::EPSILON);
        let found = warnings(&spec, "general", false);
        assert!(found[0].starts_with("low confidence (0.30)"));
        assert!(found.iter().any(|w| w.starts_with("no entities detected")));
        assert!(found.iter().any(|w| w.starts_with("generic domain")));
    }

    #[test]
    fn rich_brief_scores_high() {
        let brief = "Create an ecommerce platform with user authentication, product catalog, shopping cart, and payment processing";
        let spec = compiled(brief);
        // base + features + domain + entities + endpoints
        assert!((confidence(&spec, brief.len(), "general") - 0.95).abs() < 1e-9);
    }

    #[test]
    fn completeness_weights() {
        let spec = compiled("a tool");
        // backend, database, environments, acceptance
        assert!((completeness(&spec, "untitled-app") - 0.4).abs() < 1e-9);

        let spec = spec_with_everything();
        assert!((completeness(&spec, "untitled-app") - 1.0).abs() < f64::EPSILON);
    }

    fn spec_with_everything() -> IrSpec {
        compiled("An app called Ledger Pro with login for users and orders")
    }
}
