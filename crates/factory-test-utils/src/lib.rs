//! Testing utilities for the factory workspace
//!
//! Shared briefs, patch texts, artifact helpers and tracing setup.

#![allow(missing_docs)]

use factory_artifact::{Artifact, ArtifactChecker, Issue, IssueKind, Severity};
use std::sync::Once;

/// Brief exercising healthcare detection and HIPAA compliance
pub const HIPAA_BRIEF: &str = "Create a HIPAA-compliant patient management system with medical records";

/// Brief exercising ecommerce detection with three entities
pub const ECOMMERCE_BRIEF: &str = "Create an ecommerce platform with user authentication, product catalog, shopping cart, and payment processing";

/// Short brief with no domain, entities or compliance
pub const VAGUE_BRIEF: &str = "Build something nice";

/// Briefs covering every default domain and several app types
pub const SAMPLE_BRIEFS: &[&str] = &[
    HIPAA_BRIEF,
    ECOMMERCE_BRIEF,
    VAGUE_BRIEF,
    "A REST API in golang for a banking app with credit card payments, PCI compliant, serving millions of users",
    "A mobile app for students to track courses and upload assignments",
    "An internal task board for our team with kanban columns and email notifications",
    "A CLI tool called logship that ships IoT sensor telemetry to postgres",
    "A GDPR compliant social network with real-time messaging, search and image uploads, deployed on kubernetes",
    "A startup prototype for a delivery fleet tracker with a React frontend and MongoDB",
    "An app called Ledger Pro for invoicing customers, built with Rust and Axum, with RBAC and audit trail",
];

/// Valid patch touching two backend files
pub const VALID_PATCH: &str = "### FACTORY/1 PATCH
- file: backend/api/users.py
- file: backend/models/user.py
```diff
--- a/backend/api/users.py
+++ b/backend/api/users.py
@@ -1,3 +1,4 @@
 from fastapi import APIRouter
+from backend.models.user import User
 router = APIRouter()
--- a/backend/models/user.py
+++ b/backend/models/user.py
@@ -0,0 +1,3 @@
+class User:
+    id: str
+    email: str
```
### END";

/// Header followed by conversational prose before the file list
pub const PROSE_PATCH: &str = "### FACTORY/1 PATCH
Here's the patch you requested:
- file: backend/api/users.py
```diff
+print('hello')
```
### END";

/// Patch that tries to escape the source tree
pub const TRAVERSAL_PATCH: &str = "### FACTORY/1 PATCH
- file: ../../../etc/passwd
```diff
+root::0:0:root:/root:/bin/bash
```
### END";

/// Fence never closed before the trailer
pub const UNCLOSED_PATCH: &str = "### FACTORY/1 PATCH
- file: backend/api/users.py
```diff
+print('hello')
### END";

/// Model refusal
pub const REFUSAL: &str = "I cannot help you with this request.";

/// Allow-list used by the patch fixtures
pub const ALLOWED_PREFIXES: &[&str] = &["backend/", "frontend/", "api/"];

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn create_test_artifact(path: &str, content: &str) -> Artifact {
    Artifact::new(path, content)
}

/// Checker reporting every line containing a marker
#[derive(Debug, Clone)]
pub struct MarkerChecker {
    pub marker: String,
    pub severity: Severity,
}

impl MarkerChecker {
    pub fn new(marker: &str, severity: Severity) -> Self {
        Self {
            marker: marker.to_string(),
            severity,
        }
    }
}

impl ArtifactChecker for MarkerChecker {
    fn name(&self) -> &str {
        "marker"
    }

    fn supports(&self, _artifact: &Artifact) -> bool {
        true
    }

    fn check(&self, artifacts: &[Artifact]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for artifact in artifacts {
            for (i, line) in artifact.content.lines().enumerate() {
                if line.contains(&self.marker) {
                    issues.push(
                        Issue::new(
                            self.severity,
                            IssueKind::Lint,
                            &artifact.path,
                            format!("found '{}'", self.marker),
                        )
                        .at(u32::try_from(i + 1).unwrap_or(u32::MAX), 1),
                    );
                }
            }
        }
        issues
    }
}
