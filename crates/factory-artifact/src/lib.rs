//! Factory Artifact Types
//!
//! The narrow interface between the factory front end and the
//! verification collaborators that run after a patch has been applied.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: a generated file (path, language, kind, content)
//! - [`Issue`]: a finding reported by a checker
//! - [`ArtifactChecker`]: the trait a static-analysis runner implements
//! - [`ContentHash`]: Blake3 digest for diff bodies and file contents
//!
//! # Example
//!
//! ```rust,ignore
//! use factory_artifact::{Artifact, IssueReport};
//!
//! let artifacts = vec![Artifact::new("backend/main.go", source)];
//! let report = IssueReport::collect(&[&vet], &artifacts);
//! if report.has_blocking() {
//!     // reject the build
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod hash;
mod issue;
mod language;

pub use artifact::Artifact;
pub use hash::{ContentHash, HashError};
pub use issue::{ArtifactChecker, Issue, IssueKind, IssueReport, Severity};
pub use language::{ArtifactKind, Language};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
