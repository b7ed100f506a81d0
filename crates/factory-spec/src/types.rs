//! Intermediate Representation types
//!
//! Defines the IR emitted for a brief:
//! - Application metadata and tech stack
//! - Non-functional requirements
//! - Data model and generated REST surface
//! - UI, ops and acceptance sections
//! - The compilation result wrapper handed to downstream collaborators
//!
//! Field names and nesting are part of the JSON contract consumed by prompt
//! assembly and agent selection (`app.stack.backend.language`,
//! `data.entities[].fields`, ...). Do not rename without versioning.

use crate::overlay::OverlaySuggestion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Versioned specification produced for one brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrSpec {
    /// IR schema version
    pub version: String,
    /// Verbatim input brief
    pub brief: String,
    pub app: App,
    pub non_functionals: NonFunctionals,
    pub api: Api,
    pub data: DataModel,
    pub ui: Ui,
    pub ops: Ops,
    pub acceptance: Vec<AcceptanceCriterion>,
    pub metadata: Metadata,
}

/// Application metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub app_type: AppType,
    pub domain: String,
    pub stack: TechStack,
    pub features: Vec<Feature>,
    pub scale: Scale,
}

/// Application form factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    Api,
    Web,
    Mobile,
    Cli,
    Desktop,
}

impl AppType {
    /// Lowercase name as used in the IR
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::Api => "api",
            AppType::Web => "web",
            AppType::Mobile => "mobile",
            AppType::Cli => "cli",
            AppType::Desktop => "desktop",
        }
    }

    /// Whether the app ships a user interface with pages
    #[inline]
    #[must_use]
    pub fn has_pages(&self) -> bool {
        matches!(self, AppType::Web | AppType::Mobile)
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(AppType::Api),
            "web" => Ok(AppType::Web),
            "mobile" => Ok(AppType::Mobile),
            "cli" => Ok(AppType::Cli),
            "desktop" => Ok(AppType::Desktop),
            other => Err(format!("unknown app type: {other}")),
        }
    }
}

/// Selected technologies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub backend: Backend,
    /// Only populated for web apps
    pub frontend: Option<Frontend>,
    pub database: Database,
    /// Only populated when caching is mentioned
    pub cache: Option<Cache>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub language: String,
    pub framework: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontend {
    pub framework: String,
    pub language: String,
    pub styling: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Feature priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A product feature detected in the brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: String,
    pub priority: Priority,
}

/// Coarse scale bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaleTier {
    Startup,
    #[default]
    Standard,
    Enterprise,
}

/// Scale targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub tier: ScaleTier,
    pub users: u64,
    pub requests_per_second: u64,
    pub data_size_gb: u64,
    /// Availability target in percent
    pub availability: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            tier: ScaleTier::Standard,
            users: 1_000,
            requests_per_second: 100,
            data_size_gb: 10,
            availability: 99.9,
        }
    }
}

/// Non-functional requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFunctionals {
    pub security: Security,
    pub performance: Performance,
    pub compliance: Compliance,
    pub monitoring: Monitoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub auth_methods: Vec<String>,
    pub authorization: Option<String>,
    pub encryption_at_rest: Option<String>,
    pub encryption_in_transit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub p95_latency_ms: u32,
    pub throughput_rps: u64,
    pub realtime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compliance {
    pub standards: Vec<String>,
    pub audit_logging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitoring {
    pub metrics: bool,
    pub logging: bool,
    pub tracing: bool,
    pub alerting: bool,
}

/// API style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    #[default]
    Rest,
    Graphql,
    Grpc,
}

/// Generated API surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    #[serde(rename = "type")]
    pub api_type: ApiType,
    pub base_path: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One REST endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    /// Entity this endpoint serves
    pub entity: String,
    pub auth_required: bool,
    pub request_schema: Option<String>,
    pub response_schema: Option<String>,
    pub status_codes: Vec<u16>,
}

/// Data model section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DataModel {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl DataModel {
    /// Look up an entity by name
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Entity names in extraction order
    #[must_use]
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Domain noun with its persisted fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default: Option<String>,
}

impl Field {
    /// Optional, non-unique field without default
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required: false,
            unique: false,
            default: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

/// Directed edge between two extracted entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub foreign_key: String,
}

/// UI section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ui {
    pub pages: Vec<Page>,
    pub responsive: bool,
    pub accessibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub route: String,
    pub components: Vec<String>,
}

/// Delivery and runtime section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ops {
    pub environments: Vec<String>,
    pub container_runtime: String,
    pub orchestrator: Option<String>,
    pub ci_provider: String,
    pub autoscaling: bool,
}

/// Acceptance criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCriterion {
    pub id: String,
    pub description: String,
    pub category: String,
}

/// Bookkeeping attached to every IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Always within [0, 1]
    pub confidence: f64,
    /// Always within [0, 1]
    pub completeness: f64,
    pub source: String,
    pub tags: Vec<String>,
}

/// Clarification prompt for an ambiguous brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub rationale: String,
    pub options: Vec<String>,
    pub blocking: bool,
}

/// Output of one compilation
///
/// Constructed once per compile call. Only the explicit-overlay merge path
/// touches it afterwards, and that path keeps the overlay lists disjoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    pub spec: IrSpec,
    pub questions: Vec<Question>,
    pub warnings: Vec<String>,
    pub confidence: f64,
    /// Confidence >= 0.8, or supplied by the caller
    pub required_overlays: Vec<String>,
    /// 0.5 <= confidence < 0.8
    pub suggested_overlays: Vec<String>,
    pub overlay_suggestions: Vec<OverlaySuggestion>,
}

impl CompilationResult {
    /// Serialize to the JSON contract
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the named overlay is required
    #[must_use]
    pub fn requires_overlay(&self, name: &str) -> bool {
        self.required_overlays.iter().any(|o| o == name)
    }

    /// Total endpoint count
    #[inline]
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.spec.api.endpoints.len()
    }
}
