//! Specification compiler
//!
//! Orchestrates the section extractors and the overlay detector:
//! 1. Normalize the brief
//! 2. Extract app, stack, features, scale and non-functionals
//! 3. Extract the data model and derive the REST surface
//! 4. Fill UI, ops, acceptance and questions
//! 5. Score, warn and split overlay suggestions into required/suggested

use crate::config::CompilerConfig;
use crate::error::{CompileError, CompileResult, ConfigError};
use crate::extract::{normalize, Extractors};
use crate::overlay::{self, OverlayDetectionResult, OverlayDetector};
use crate::scoring;
use crate::types::{App, CompilationResult, IrSpec, Metadata};
use chrono::Utc;

/// Compiles free-text briefs into [`IrSpec`]s
///
/// All tables are compiled in [`SpecificationCompiler::new`]; a compiler is
/// immutable afterwards and can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SpecificationCompiler {
    extractors: Extractors,
    detector: OverlayDetector,
    config: CompilerConfig,
}

impl SpecificationCompiler {
    /// Build a compiler from configuration
    ///
    /// # Errors
    /// Returns error if any rule table fails to compile
    pub fn new(config: CompilerConfig) -> Result<Self, ConfigError> {
        let extractors = Extractors::new(&config)?;
        let detector = OverlayDetector::new(config.overlay.clone())?;
        Ok(Self {
            extractors,
            detector,
            config,
        })
    }

    /// Compiler configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiled extraction tables
    #[inline]
    #[must_use]
    pub fn extractors(&self) -> &Extractors {
        &self.extractors
    }

    /// Compile a brief
    ///
    /// # Errors
    /// Returns [`CompileError::EmptyBrief`] if the brief is empty or
    /// whitespace only
    pub fn compile(&self, brief: &str) -> CompileResult<CompilationResult> {
        let trimmed = brief.trim();
        if trimmed.is_empty() {
            return Err(CompileError::EmptyBrief);
        }

        let ex = &self.extractors;
        let defaults = ex.defaults();
        let text = normalize(brief);

        let app_type = ex.app_type(&text);
        let domain = ex.domain(&text);
        let name = ex.app_name(&text, &domain, app_type);
        let stack = ex.tech_stack(&text, app_type);
        let features = ex.features(&text);
        let scale = ex.scale(&text);
        let non_functionals = ex.non_functionals(&text, &features, &scale);
        let data = ex.data_model(&text);
        let api = ex.api(&text, &data);
        let ui = ex.ui(app_type, &data);
        let ops = ex.ops(&text, &scale);
        let acceptance = ex.acceptance(&non_functionals);
        let questions = ex.questions(&domain, &non_functionals.compliance.standards);
        let only_generic = ex.only_generic(&features);

        let mut tags = vec![domain.clone(), app_type.to_string()];
        for standard in &non_functionals.compliance.standards {
            if !tags.contains(standard) {
                tags.push(standard.clone());
            }
        }

        let now = Utc::now();
        let mut spec = IrSpec {
            version: defaults.ir_version.clone(),
            brief: brief.to_string(),
            app: App {
                name,
                description: trimmed.to_string(),
                app_type,
                domain,
                stack,
                features,
                scale,
            },
            non_functionals,
            api,
            data,
            ui,
            ops,
            acceptance,
            metadata: Metadata {
                created_at: now,
                updated_at: now,
                confidence: 0.0,
                completeness: 0.0,
                source: defaults.source.clone(),
                tags,
            },
        };

        spec.metadata.confidence = scoring::confidence(&spec, trimmed.chars().count(), &defaults.domain);
        spec.metadata.completeness = scoring::completeness(&spec, &defaults.placeholder_name);

        let detection = self.detector.detect(brief);
        let mut warnings = scoring::warnings(&spec, &defaults.domain, only_generic);
        warnings.extend(detection.warnings.iter().cloned());

        let (required_overlays, suggested_overlays) = self.split_overlays(&detection);

        tracing::info!(
            app = %spec.app.name,
            domain = %spec.app.domain,
            entities = spec.data.entities.len(),
            endpoints = spec.api.endpoints.len(),
            confidence = spec.metadata.confidence,
            required_overlays = ?required_overlays,
            "brief compiled"
        );

        Ok(CompilationResult {
            confidence: spec.metadata.confidence,
            spec,
            questions,
            warnings,
            required_overlays,
            suggested_overlays,
            overlay_suggestions: detection.suggestions,
        })
    }

    /// Compile, then require the caller's overlays in addition to detected ones
    ///
    /// Caller names are trimmed and lower-cased, merged into
    /// `required_overlays` (deduplicated) and
    /// removed from `suggested_overlays`; compatibility warnings for the
    /// final required set are appended.
    ///
    /// # Errors
    /// Returns [`CompileError::EmptyBrief`] if the brief is empty
    pub fn compile_with_overlays<S: AsRef<str>>(
        &self,
        brief: &str,
        overlays: &[S],
    ) -> CompileResult<CompilationResult> {
        let mut result = self.compile(brief)?;

        for name in overlays.iter().map(AsRef::as_ref) {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            if !result.required_overlays.contains(&name) {
                result.required_overlays.push(name);
            }
        }
        let required = &result.required_overlays;
        result.suggested_overlays.retain(|s| !required.contains(s));

        let compat = self.validate_overlay_compatibility(&result.required_overlays, &result.spec);
        result.warnings.extend(compat);

        tracing::debug!(required = ?result.required_overlays, "caller overlays merged");
        Ok(result)
    }

    /// Overlay detection alone, without compiling
    #[must_use]
    pub fn suggest_overlays(&self, brief: &str) -> OverlayDetectionResult {
        self.detector.detect(brief)
    }

    /// Advisory cross-check of an overlay set against a spec
    #[must_use]
    pub fn validate_overlay_compatibility(&self, overlays: &[String], spec: &IrSpec) -> Vec<String> {
        overlay::validate_overlay_compatibility(overlays, spec, self.detector.config())
    }

    fn split_overlays(&self, detection: &OverlayDetectionResult) -> (Vec<String>, Vec<String>) {
        let thresholds = self.detector.config();
        let required = detection.names_at_least(thresholds.auto_apply_threshold);
        let suggested = detection
            .names_at_least(thresholds.suggest_threshold)
            .into_iter()
            .filter(|name| !required.contains(name))
            .collect();
        (required, suggested)
    }
}

impl Default for SpecificationCompiler {
    /// Compiler over the built-in tables
    ///
    /// # Panics
    /// Panics if a built-in rule table fails to compile
    fn default() -> Self {
        Self::new(CompilerConfig::default()).expect("built-in compiler tables compile")
    }
}
