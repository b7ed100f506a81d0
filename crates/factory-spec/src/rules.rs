//! Ordered keyword rules
//!
//! Every classification in the compiler (domain, app type, language,
//! database, toggles) is an ordered list of `(pattern, category, weight)`
//! rules evaluated against normalized text. Order is the priority: the
//! first matching rule wins wherever a single answer is needed, except
//! where a heavier rule is allowed to outrank an earlier one.

use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Serializable rule definition, as it appears in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Value produced when the rule matches
    pub category: String,
    /// Case-insensitive regular expression
    pub pattern: String,
    /// Relative weight; a heavier match outranks earlier rules in
    /// [`RuleSet::best_category`]
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl RuleDef {
    /// Rule with unit weight
    #[must_use]
    pub fn new(category: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
            weight: default_weight(),
        }
    }

    /// With explicit weight
    #[inline]
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Compile a case-insensitive pattern, naming it in the error
///
/// # Errors
/// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile
pub fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::invalid_pattern(name, e))
}

/// A compiled rule
#[derive(Debug, Clone)]
pub struct Rule {
    category: String,
    weight: f64,
    regex: Regex,
}

impl Rule {
    /// Category produced by this rule
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Rule weight
    #[inline]
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether the rule matches anywhere in the text
    #[inline]
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered, read-only collection of compiled rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile rule definitions, preserving their order
    ///
    /// # Errors
    /// Returns the first pattern that fails to compile
    pub fn compile(name: impl Into<String>, defs: &[RuleDef]) -> Result<Self, ConfigError> {
        let name = name.into();
        let rules = defs
            .iter()
            .map(|def| {
                let regex = compile_pattern(&format!("{name}:{}", def.category), &def.pattern)?;
                Ok(Rule {
                    category: def.category.clone(),
                    weight: def.weight,
                    regex,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { name, rules })
    }

    /// Table name, for diagnostics
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Categories of all rules, in table order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::category)
    }

    /// First rule (in table order) matching the text
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.is_match(text))
    }

    /// Category of the first matching rule
    #[must_use]
    pub fn first_category(&self, text: &str) -> Option<&str> {
        self.first_match(text).map(Rule::category)
    }

    /// All matching rules, in table order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.is_match(text))
    }

    /// Distinct categories of all matching rules, in table order
    #[must_use]
    pub fn matched_categories(&self, text: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for rule in self.matches(text) {
            if !out.iter().any(|c| c == rule.category()) {
                out.push(rule.category().to_string());
            }
        }
        out
    }

    /// Whether any rule with the given category matches
    #[must_use]
    pub fn has(&self, category: &str, text: &str) -> bool {
        self.rules
            .iter()
            .any(|r| r.category == category && r.is_match(text))
    }

    /// Category of the heaviest matching rule; table order breaks ties
    #[must_use]
    pub fn best_category(&self, text: &str) -> Option<&str> {
        let mut best: Option<&Rule> = None;
        for rule in self.rules.iter().filter(|r| r.is_match(text)) {
            if best.map_or(true, |b| rule.weight > b.weight) {
                best = Some(rule);
            }
        }
        best.map(Rule::category)
    }
}
