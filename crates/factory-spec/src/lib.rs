//! Factory Specification Compiler
//!
//! Turns a free-text product brief into a structured Intermediate
//! Representation:
//! - Application metadata, tech stack, features and scale
//! - Entities, relationships and a generated REST surface
//! - Security, performance, compliance and monitoring requirements
//! - UI pages, ops settings and baseline acceptance criteria
//! - Confidence and completeness scores with warnings and questions
//!
//! Overlay detection runs alongside compilation and recommends (or
//! auto-applies) domain and compliance overlays.
//!
//! # Example
//!
//! ```rust,ignore
//! use factory_spec::SpecificationCompiler;
//!
//! let compiler = SpecificationCompiler::default();
//! let result = compiler.compile("An ecommerce platform with user login and a product catalog")?;
//!
//! assert_eq!(result.spec.app.domain, "ecommerce");
//! println!("{}", result.to_json()?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod extract;
pub mod overlay;
pub mod rules;
pub mod scoring;
pub mod types;

pub use compiler::SpecificationCompiler;
pub use config::{CompilerConfig, CompilerDefaults, EntityTemplate, FeatureTemplate, RelationshipRule};
pub use error::{CompileError, CompileResult, ConfigError};
pub use extract::{normalize, Extractors};
pub use overlay::{
    validate_overlay_compatibility, OverlayConfig, OverlayDetectionResult, OverlayDetector,
    OverlayPattern, OverlaySuggestion, OverlayType,
};
pub use rules::{Rule, RuleDef, RuleSet};
pub use types::{
    AcceptanceCriterion, Api, ApiType, App, AppType, CompilationResult, Endpoint, Entity, Feature,
    Field, HttpMethod, IrSpec, Metadata, NonFunctionals, Question, Relationship, RelationshipKind,
    Scale, ScaleTier, TechStack,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for compiling briefs
    pub use crate::{
        CompilationResult, CompileError, CompilerConfig, IrSpec, OverlayConfig, OverlayDetector,
        SpecificationCompiler,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
