//! Clarification questions

use super::Extractors;
use crate::types::Question;

impl Extractors {
    /// Non-blocking questions for a generic domain and missing compliance
    #[must_use]
    pub fn questions(&self, domain: &str, standards: &[String]) -> Vec<Question> {
        let mut questions = Vec::new();

        if domain == self.defaults.domain {
            let mut options = self.domain_categories();
            options.push("other".to_string());
            questions.push(Question {
                id: "domain_clarification".to_string(),
                prompt: "What industry or domain does this application serve?".to_string(),
                rationale: "No domain keywords were found, so domain-specific requirements were not applied"
                    .to_string(),
                options,
                blocking: false,
            });
        }

        if standards.is_empty() {
            let mut options = self.compliance_categories();
            options.push("none".to_string());
            questions.push(Question {
                id: "compliance_clarification".to_string(),
                prompt: "Does the application need to meet any compliance standards?".to_string(),
                rationale: "No compliance standard was mentioned; regulated data needs audit logging and encryption"
                    .to_string(),
                options,
                blocking: false,
            });
        }

        questions
    }

    fn domain_categories(&self) -> Vec<String> {
        self.domains.categories().map(str::to_string).collect()
    }

    fn compliance_categories(&self) -> Vec<String> {
        self.compliance.categories().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;

    #[test]
    fn general_domain_without_compliance_asks_both() {
        let ex = Extractors::new(&CompilerConfig::default()).unwrap();
        let questions = ex.questions("general", &[]);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "domain_clarification");
        assert_eq!(questions[0].options.first().map(String::as_str), Some("ecommerce"));
        assert_eq!(questions[0].options.last().map(String::as_str), Some("other"));
        assert_eq!(questions[1].id, "compliance_clarification");
        assert!(questions[1].options.contains(&"hipaa".to_string()));
        assert!(questions.iter().all(|q| !q.blocking));
    }

    #[test]
    fn known_domain_with_compliance_asks_nothing() {
        let ex = Extractors::new(&CompilerConfig::default()).unwrap();
        assert!(ex.questions("fintech", &["pci".to_string()]).is_empty());
    }
}
