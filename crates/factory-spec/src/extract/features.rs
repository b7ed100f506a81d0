//! Feature templates

use super::Extractors;
use crate::types::Feature;

impl Extractors {
    /// Features whose pattern matches anywhere, once each, in table order
    #[must_use]
    pub fn features(&self, text: &str) -> Vec<Feature> {
        let mut out: Vec<Feature> = Vec::new();
        for (template, regex) in &self.features {
            if regex.is_match(text) && !out.iter().any(|f| f.name == template.name) {
                out.push(Feature {
                    name: template.name.clone(),
                    description: template.description.clone(),
                    priority: template.priority,
                });
            }
        }
        out
    }

    /// Whether every feature is in the generic list
    #[must_use]
    pub fn only_generic(&self, features: &[Feature]) -> bool {
        !features.is_empty()
            && features
                .iter()
                .all(|f| self.defaults.generic_features.contains(&f.name))
    }
}
