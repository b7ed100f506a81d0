//! Security, performance, compliance and monitoring toggles

use super::Extractors;
use crate::types::{Compliance, Feature, Monitoring, NonFunctionals, Performance, Scale, ScaleTier, Security};

impl Extractors {
    /// Keyword-gated non-functional requirements
    ///
    /// Audit logging is on when mentioned or when any compliance standard
    /// is detected. Authentication without a named method falls back to the
    /// configured default method.
    #[must_use]
    pub fn non_functionals(&self, text: &str, features: &[Feature], scale: &Scale) -> NonFunctionals {
        let standards = self.compliance_standards(text);

        let mut auth_methods = self.auth_methods.matched_categories(text);
        if auth_methods.is_empty() && features.iter().any(|f| f.name == "authentication") {
            auth_methods.push(self.defaults.auth_method.clone());
        }

        let authorization = if self.signal("acl", text) {
            Some("acl".to_string())
        } else if self.signal("rbac", text) {
            Some("rbac".to_string())
        } else {
            None
        };

        let encryption_at_rest = (self.signal("encryption", text) || !standards.is_empty())
            .then(|| self.defaults.encryption_at_rest.clone());

        let realtime = self.signal("realtime", text);
        let p95_latency_ms = if realtime {
            self.defaults.realtime_latency_ms
        } else {
            self.defaults.p95_latency_ms
        };

        let enterprise = scale.tier == ScaleTier::Enterprise;
        let audit_logging = self.signal("audit", text) || !standards.is_empty();

        NonFunctionals {
            security: Security {
                auth_methods,
                authorization,
                encryption_at_rest,
                encryption_in_transit: true,
            },
            performance: Performance {
                p95_latency_ms,
                throughput_rps: scale.requests_per_second,
                realtime,
            },
            compliance: Compliance {
                standards,
                audit_logging,
            },
            monitoring: Monitoring {
                metrics: true,
                logging: true,
                tracing: self.signal("tracing", text) || enterprise,
                alerting: self.signal("alerting", text) || enterprise,
            },
        }
    }
}
