//! Baseline acceptance criteria

use super::Extractors;
use crate::types::{AcceptanceCriterion, NonFunctionals};

impl Extractors {
    /// Baseline acceptance criteria; the brief does not add any
    #[must_use]
    pub fn acceptance(&self, non_functionals: &NonFunctionals) -> Vec<AcceptanceCriterion> {
        vec![
            criterion(
                "AC-001",
                "All endpoints return the documented status codes",
                "functional",
            ),
            criterion(
                "AC-002",
                "Protected endpoints reject unauthenticated requests",
                "security",
            ),
            criterion(
                "AC-003",
                &format!(
                    "p95 response latency stays under {} ms",
                    non_functionals.performance.p95_latency_ms
                ),
                "performance",
            ),
        ]
    }
}

fn criterion(id: &str, description: &str, category: &str) -> AcceptanceCriterion {
    AcceptanceCriterion {
        id: id.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}
