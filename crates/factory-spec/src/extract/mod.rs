//! Per-section extractors
//!
//! Each extractor is a pure function of the normalized brief (plus the
//! output of earlier extractors where a section depends on another, e.g.
//! endpoints on entities). Rule tables are compiled once in
//! [`Extractors::new`] and only read afterwards.

mod acceptance;
mod api;
mod app;
mod data;
mod features;
mod nonfunctional;
mod questions;
mod scale;
mod stack;
mod ui_ops;

use crate::config::{CompilerConfig, CompilerDefaults, EntityTemplate, FeatureTemplate, RelationshipRule};
use crate::error::ConfigError;
use crate::rules::{compile_pattern, RuleSet};
use crate::types::AppType;
use indexmap::IndexMap;
use regex::Regex;

/// Lower-case, collapse whitespace runs to one space, trim
#[must_use]
pub fn normalize(brief: &str) -> String {
    brief
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compiled extraction tables
#[derive(Debug, Clone)]
pub struct Extractors {
    defaults: CompilerDefaults,
    default_app_type: AppType,
    name_patterns: Vec<Regex>,
    app_type_markers: RuleSet,
    app_type_signals: RuleSet,
    domains: RuleSet,
    languages: RuleSet,
    frameworks: IndexMap<String, RuleSet>,
    frontend_frameworks: RuleSet,
    databases: RuleSet,
    compliance: RuleSet,
    auth_methods: RuleSet,
    signals: RuleSet,
    features: Vec<(FeatureTemplate, Regex)>,
    entities: Vec<(EntityTemplate, Regex)>,
    relationships: Vec<RelationshipRule>,
}

impl Extractors {
    /// Compile every table in the configuration
    ///
    /// # Errors
    /// Returns error if a pattern does not compile or an app-type rule names
    /// an unknown type
    pub fn new(config: &CompilerConfig) -> Result<Self, ConfigError> {
        let name_patterns = config
            .name_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| compile_pattern(&format!("name:{i}"), p))
            .collect::<Result<Vec<_>, _>>()?;

        let app_type_markers = RuleSet::compile("app_type", &config.app_type_markers)?;
        let app_type_signals = RuleSet::compile("app_type_signal", &config.app_type_signals)?;
        for def in config.app_type_markers.iter().chain(&config.app_type_signals) {
            parse_app_type(&def.category)?;
        }
        let default_app_type = parse_app_type(&config.defaults.app_type)?;

        let frameworks = config
            .frameworks
            .iter()
            .map(|(language, defs)| {
                RuleSet::compile(format!("framework:{language}"), defs).map(|set| (language.clone(), set))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        let features = config
            .features
            .iter()
            .map(|t| compile_pattern(&format!("feature:{}", t.name), &t.pattern).map(|re| (t.clone(), re)))
            .collect::<Result<Vec<_>, _>>()?;
        let entities = config
            .entities
            .iter()
            .map(|t| compile_pattern(&format!("entity:{}", t.name), &t.pattern).map(|re| (t.clone(), re)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            defaults: config.defaults.clone(),
            default_app_type,
            name_patterns,
            app_type_markers,
            app_type_signals,
            domains: RuleSet::compile("domain", &config.domains)?,
            languages: RuleSet::compile("backend_language", &config.backend_languages)?,
            frameworks,
            frontend_frameworks: RuleSet::compile("frontend_framework", &config.frontend_frameworks)?,
            databases: RuleSet::compile("database", &config.databases)?,
            compliance: RuleSet::compile("compliance", &config.compliance_standards)?,
            auth_methods: RuleSet::compile("auth_method", &config.auth_methods)?,
            signals: RuleSet::compile("signal", &config.signals)?,
            features,
            entities,
            relationships: config.relationships.clone(),
        })
    }

    /// Fallback values
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &CompilerDefaults {
        &self.defaults
    }

    /// Whether a keyword-gated toggle is present
    #[inline]
    #[must_use]
    pub fn signal(&self, name: &str, text: &str) -> bool {
        self.signals.has(name, text)
    }

    /// Compliance standards mentioned, in table order
    #[must_use]
    pub fn compliance_standards(&self, text: &str) -> Vec<String> {
        self.compliance.matched_categories(text)
    }
}

fn parse_app_type(value: &str) -> Result<AppType, ConfigError> {
    value.parse().map_err(|_| ConfigError::UnknownCategory {
        kind: "app type",
        value: value.to_string(),
    })
}
