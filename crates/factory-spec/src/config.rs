//! Compiler configuration
//!
//! All keyword tables live here as data and are handed to the compiler at
//! construction. Tables are ordered lists: position is priority. Tests and
//! alternative deployments can replace any table without touching code.

use crate::error::ConfigError;
use crate::overlay::OverlayConfig;
use crate::rules::RuleDef;
use crate::types::{Field, Priority, Scale, ScaleTier};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fallback values used when a brief says nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerDefaults {
    /// IR schema version stamped on every spec
    pub ir_version: String,
    /// Source tag stamped on metadata
    pub source: String,
    /// Name used when neither an explicit name nor a domain is found
    pub placeholder_name: String,
    pub app_type: String,
    pub domain: String,
    pub backend_language: String,
    /// Framework per backend language, used when the brief names none
    pub frameworks: IndexMap<String, String>,
    pub frontend_framework: String,
    pub frontend_language: String,
    pub frontend_styling: String,
    pub database: String,
    pub cache: String,
    /// Auth method assumed when authentication is wanted but unspecified
    pub auth_method: String,
    pub encryption_at_rest: String,
    pub environments: Vec<String>,
    pub api_base_path: String,
    pub container_runtime: String,
    pub ci_provider: String,
    pub accessibility: String,
    pub p95_latency_ms: u32,
    pub realtime_latency_ms: u32,
    pub baseline_scale: Scale,
    pub enterprise_scale: Scale,
    pub startup_scale: Scale,
    /// Feature names considered generic for warning purposes
    pub generic_features: Vec<String>,
}

impl CompilerDefaults {
    /// Create default values
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default backend language
    #[inline]
    #[must_use]
    pub fn with_backend_language(mut self, language: impl Into<String>) -> Self {
        self.backend_language = language.into();
        self
    }

    /// With default database
    #[inline]
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// With deployment environments
    #[inline]
    #[must_use]
    pub fn with_environments(mut self, environments: Vec<String>) -> Self {
        self.environments = environments;
        self
    }

    /// Default framework for a backend language
    #[must_use]
    pub fn framework_for(&self, language: &str) -> Option<&str> {
        self.frameworks.get(language).map(String::as_str)
    }
}

impl Default for CompilerDefaults {
    fn default() -> Self {
        let frameworks = [
            ("python", "fastapi"),
            ("go", "gin"),
            ("nodejs", "express"),
            ("java", "spring-boot"),
            ("ruby", "rails"),
            ("php", "laravel"),
            ("rust", "axum"),
            ("csharp", "aspnet-core"),
        ]
        .into_iter()
        .map(|(l, f)| (l.to_string(), f.to_string()))
        .collect();

        Self {
            ir_version: "1.0.0".to_string(),
            source: "brief".to_string(),
            placeholder_name: "untitled-app".to_string(),
            app_type: "web".to_string(),
            domain: "general".to_string(),
            backend_language: "python".to_string(),
            frameworks,
            frontend_framework: "react".to_string(),
            frontend_language: "typescript".to_string(),
            frontend_styling: "tailwindcss".to_string(),
            database: "postgresql".to_string(),
            cache: "redis".to_string(),
            auth_method: "jwt".to_string(),
            encryption_at_rest: "aes-256".to_string(),
            environments: vec![
                "development".to_string(),
                "staging".to_string(),
                "production".to_string(),
            ],
            api_base_path: "/api/v1".to_string(),
            container_runtime: "docker".to_string(),
            ci_provider: "github-actions".to_string(),
            accessibility: "wcag-2.1-aa".to_string(),
            p95_latency_ms: 500,
            realtime_latency_ms: 100,
            baseline_scale: Scale::default(),
            enterprise_scale: Scale {
                tier: ScaleTier::Enterprise,
                users: 1_000_000,
                requests_per_second: 10_000,
                data_size_gb: 1_000,
                availability: 99.99,
            },
            startup_scale: Scale {
                tier: ScaleTier::Startup,
                users: 100,
                requests_per_second: 10,
                data_size_gb: 1,
                availability: 99.0,
            },
            generic_features: vec!["data-management".to_string()],
        }
    }
}

/// Feature template gated by a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTemplate {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub pattern: String,
}

impl FeatureTemplate {
    fn new(name: &str, description: &str, priority: Priority, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            priority,
            pattern: pattern.to_string(),
        }
    }
}

/// Entity template gated by a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    /// Plural resource segment used in endpoint paths
    pub plural: String,
    pub description: String,
    pub pattern: String,
    pub fields: Vec<Field>,
}

/// Fixed entity-pair relationship rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRule {
    pub from: String,
    pub to: String,
    pub kind: crate::types::RelationshipKind,
    pub foreign_key: String,
}

/// Full compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub defaults: CompilerDefaults,
    /// Patterns extracting an explicit app name; capture group 1 is the name
    pub name_patterns: Vec<String>,
    /// Explicit app-type markers, checked first
    pub app_type_markers: Vec<RuleDef>,
    /// Secondary app-type signals, checked when no marker matches
    pub app_type_signals: Vec<RuleDef>,
    pub domains: Vec<RuleDef>,
    pub backend_languages: Vec<RuleDef>,
    /// Framework rules keyed by backend language
    pub frameworks: IndexMap<String, Vec<RuleDef>>,
    pub frontend_frameworks: Vec<RuleDef>,
    pub databases: Vec<RuleDef>,
    pub compliance_standards: Vec<RuleDef>,
    pub auth_methods: Vec<RuleDef>,
    /// Keyword-gated toggles (cache, audit, tracing, scale, api style, ...)
    pub signals: Vec<RuleDef>,
    pub features: Vec<FeatureTemplate>,
    pub entities: Vec<EntityTemplate>,
    pub relationships: Vec<RelationshipRule>,
    pub overlay: OverlayConfig,
}

impl CompilerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fallback values
    #[inline]
    #[must_use]
    pub fn with_defaults(mut self, defaults: CompilerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// With overlay detector configuration
    #[inline]
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    /// Load from a TOML document; missing keys fall back to defaults
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this shape
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            defaults: CompilerDefaults::default(),
            name_patterns: default_name_patterns(),
            app_type_markers: default_app_type_markers(),
            app_type_signals: default_app_type_signals(),
            domains: default_domains(),
            backend_languages: default_backend_languages(),
            frameworks: default_frameworks(),
            frontend_frameworks: default_frontend_frameworks(),
            databases: default_databases(),
            compliance_standards: default_compliance_standards(),
            auth_methods: default_auth_methods(),
            signals: default_signals(),
            features: default_features(),
            entities: default_entities(),
            relationships: default_relationships(),
            overlay: OverlayConfig::default(),
        }
    }
}

fn rules(entries: &[(&str, &str)]) -> Vec<RuleDef> {
    entries
        .iter()
        .map(|(category, pattern)| RuleDef::new(*category, *pattern))
        .collect()
}

fn default_name_patterns() -> Vec<String> {
    vec![
        r#"\b(?:app|application|system|platform|service|api|tool|website|site|project|product)\s+(?:called|named)\s+["']?([a-z0-9][a-z0-9 _-]{0,40}?)["']?(?:\s+(?:that|which|with|for|to|where|using|so)\b|[.,;:!?]|$)"#.to_string(),
        r#"\b(?:called|named)\s+["']?([a-z0-9][a-z0-9_-]{0,40})"#.to_string(),
    ]
}

fn default_app_type_markers() -> Vec<RuleDef> {
    rules(&[
        ("api", r"\b(rest ?apis?|graphql apis?|apis?)\b"),
        ("web", r"\b(web ?apps?|web applications?|websites?|spa|single[- ]page (app|application))\b"),
        ("mobile", r"\b(mobile apps?|mobile applications?|ios apps?|android apps?)\b"),
        ("cli", r"\b(cli|command[- ]line (tool|interface|app|utility))\b"),
        ("desktop", r"\b(desktop apps?|desktop applications?)\b"),
    ])
}

fn default_app_type_signals() -> Vec<RuleDef> {
    rules(&[
        ("api", r"\b(endpoints?|routes?)\b"),
        ("web", r"\b(pages?|components?)\b"),
    ])
}

fn default_domains() -> Vec<RuleDef> {
    rules(&[
        ("ecommerce", r"\b(e-?commerce|online store|shop|shopping|storefront|marketplace|product catalog|retail)\b"),
        ("fintech", r"\b(fintech|bank|banking|finance|financial|wallets?|trading|loans?|investments?|payments? platform)\b"),
        ("healthcare", r"\b(health ?care|health|medical|patients?|hospitals?|clinics?|doctors?|ehr|emr|telemedicine)\b"),
        ("education", r"\b(education|e-?learning|courses?|students?|schools?|teachers?|lms|university)\b"),
        ("social", r"\b(social|friends?|followers?|news ?feed|community|messaging)\b"),
        ("productivity", r"\b(tasks?|todos?|to-do|project management|kanban|calendar|notes?)\b"),
        ("logistics", r"\b(logistics|shipping|fleet|deliveries|delivery|warehouses?|shipment)\b"),
        ("iot", r"\b(iot|sensors?|telemetry|smart devices?)\b"),
    ])
}

fn default_backend_languages() -> Vec<RuleDef> {
    rules(&[
        ("python", r"\b(python|django|flask|fastapi)\b"),
        ("go", r"\b(golang|go lang)\b|\b(in|using|with) go\b|\bgo (backend|service|server|api|microservice)s?\b"),
        ("nodejs", r"\b(node|nodejs|node\.js|express\.?js|nestjs|nest\.js)\b"),
        ("java", r"\b(java|spring|spring boot)\b"),
        ("ruby", r"\b(ruby|rails|sinatra)\b"),
        ("php", r"\b(php|laravel|symfony)\b"),
        ("rust", r"\b(rust|axum|actix|actix-web)\b"),
        ("csharp", r"\b(csharp|dotnet|asp\.net)\b|c#|\.net\b"),
    ])
}

fn default_frameworks() -> IndexMap<String, Vec<RuleDef>> {
    [
        ("python", rules(&[("fastapi", r"\bfastapi\b"), ("django", r"\bdjango\b"), ("flask", r"\bflask\b")])),
        ("go", rules(&[("gin", r"\bgin\b"), ("echo", r"\becho\b"), ("fiber", r"\bfiber\b")])),
        ("nodejs", rules(&[("nestjs", r"\bnest\.?js\b"), ("fastify", r"\bfastify\b"), ("express", r"\bexpress\b")])),
        ("java", rules(&[("quarkus", r"\bquarkus\b"), ("spring-boot", r"\bspring\b")])),
        ("ruby", rules(&[("sinatra", r"\bsinatra\b"), ("rails", r"\brails\b")])),
        ("php", rules(&[("symfony", r"\bsymfony\b"), ("laravel", r"\blaravel\b")])),
        ("rust", rules(&[("actix-web", r"\bactix\b"), ("axum", r"\baxum\b")])),
        ("csharp", rules(&[("aspnet-core", r"\basp\.net\b")])),
    ]
    .into_iter()
    .map(|(language, defs)| (language.to_string(), defs))
    .collect()
}

fn default_frontend_frameworks() -> Vec<RuleDef> {
    rules(&[
        ("nextjs", r"\bnext\.?js\b"),
        ("react", r"\breact\b"),
        ("vue", r"\bvue(\.?js)?\b"),
        ("angular", r"\bangular\b"),
        ("svelte", r"\bsvelte(kit)?\b"),
    ])
}

fn default_databases() -> Vec<RuleDef> {
    rules(&[
        ("postgresql", r"\b(postgres|postgresql|psql)\b"),
        ("mysql", r"\b(mysql|mariadb)\b"),
        ("mongodb", r"\b(mongo|mongodb)\b"),
        ("sqlite", r"\bsqlite\b"),
        ("dynamodb", r"\bdynamo ?db\b"),
    ])
}

fn default_compliance_standards() -> Vec<RuleDef> {
    rules(&[
        ("gdpr", r"\bgdpr\b"),
        ("hipaa", r"\bhipaa\b"),
        ("pci", r"\b(pci|pci-dss|pci dss)\b"),
        ("soc2", r"\bsoc ?2\b"),
        ("sox", r"\b(sox|sarbanes-oxley)\b"),
    ])
}

fn default_auth_methods() -> Vec<RuleDef> {
    rules(&[
        ("oauth2", r"\b(oauth2?|sso|single sign-on|social login|openid)\b"),
        ("basic", r"\bbasic auth(entication)?\b"),
        ("jwt", r"\b(jwt|json web tokens?|bearer tokens?)\b"),
        ("api_key", r"\bapi keys?\b"),
        ("mfa", r"\b(mfa|2fa|two[- ]factor|multi[- ]factor)\b"),
    ])
}

fn default_signals() -> Vec<RuleDef> {
    rules(&[
        ("acl", r"\b(acls?|access control lists?)\b"),
        ("rbac", r"\b(rbac|roles?|role[- ]based|permissions?|admins?)\b"),
        ("encryption", r"\b(aes|aes-256|encrypt|encrypted|encryption)\b"),
        ("audit", r"\b(audit|audits|auditing|audit trail)\b"),
        ("tracing", r"\b(tracing|opentelemetry|observability|jaeger)\b"),
        ("alerting", r"\b(alerting|on-?call|pagerduty)\b"),
        ("realtime", r"\b(real-?time|low latency|websockets?|live updates?)\b"),
        ("cache", r"\b(cache|caching|cached|redis|memcached?)\b"),
        ("kubernetes", r"\b(kubernetes|k8s|helm)\b"),
        ("enterprise", r"\b(enterprise|millions of users|million users|large[- ]scale|high traffic|global scale)\b"),
        ("startup", r"\b(startup|prototype|mvp|poc|proof of concept|side project)\b"),
        ("graphql", r"\bgraphql\b"),
        ("grpc", r"\bgrpc\b"),
    ])
}

fn default_features() -> Vec<FeatureTemplate> {
    vec![
        FeatureTemplate::new(
            "authentication",
            "User registration, login and session management",
            Priority::High,
            r"\b(auth|authentication|authenticate|login|log in|sign ?in|sign ?up|registration|oauth2?|jwt|sso)\b",
        ),
        FeatureTemplate::new(
            "data-management",
            "Create, read, update and delete operations for core records",
            Priority::High,
            r"\b(crud|create|read|update|delete|manage|management|edit)\b",
        ),
        FeatureTemplate::new(
            "payment",
            "Payment processing and billing",
            Priority::High,
            r"\b(payments?|checkout|billing|stripe|subscriptions?)\b",
        ),
        FeatureTemplate::new(
            "notification",
            "Email, SMS and push notifications",
            Priority::Medium,
            r"\b(notifications?|notify|emails?|sms|push)\b",
        ),
        FeatureTemplate::new(
            "search",
            "Search and filtering over records",
            Priority::Medium,
            r"\b(search|searching|filters?|filtering|full[- ]text)\b",
        ),
        FeatureTemplate::new(
            "file-upload",
            "File and image upload with storage",
            Priority::Medium,
            r"\b(uploads?|uploading|attachments?|file storage|images?)\b",
        ),
    ]
}

fn id_field() -> Field {
    Field::new("id", "uuid").required().unique()
}

fn created_at() -> Field {
    Field::new("created_at", "timestamp").required().with_default("now()")
}

fn default_entities() -> Vec<EntityTemplate> {
    vec![
        EntityTemplate {
            name: "User".to_string(),
            plural: "users".to_string(),
            description: "Registered user account".to_string(),
            pattern: r"\b(users?|accounts?|customers?|members?|profiles?|authentication|login|sign ?up)\b".to_string(),
            fields: vec![
                id_field(),
                Field::new("email", "string").required().unique(),
                Field::new("name", "string").required(),
                Field::new("password_hash", "string").required(),
                created_at(),
                Field::new("updated_at", "timestamp"),
            ],
        },
        EntityTemplate {
            name: "Product".to_string(),
            plural: "products".to_string(),
            description: "Item offered for sale".to_string(),
            pattern: r"\b(products?|catalog|catalogue|inventory|merchandise)\b".to_string(),
            fields: vec![
                id_field(),
                Field::new("name", "string").required(),
                Field::new("description", "text"),
                Field::new("price", "decimal").required(),
                Field::new("sku", "string").required().unique(),
                Field::new("stock", "integer").required().with_default("0"),
                created_at(),
            ],
        },
        EntityTemplate {
            name: "Order".to_string(),
            plural: "orders".to_string(),
            description: "Purchase placed by a user".to_string(),
            pattern: r"\b(orders?|purchases?|shopping cart|carts?|checkout)\b".to_string(),
            fields: vec![
                id_field(),
                Field::new("user_id", "uuid").required(),
                Field::new("status", "string").required().with_default("pending"),
                Field::new("total", "decimal").required(),
                created_at(),
            ],
        },
        EntityTemplate {
            name: "Invoice".to_string(),
            plural: "invoices".to_string(),
            description: "Bill issued to a customer".to_string(),
            pattern: r"\b(invoices?|invoicing|billing|receipts?)\b".to_string(),
            fields: vec![
                id_field(),
                Field::new("customer_id", "uuid").required(),
                Field::new("amount", "decimal").required(),
                Field::new("status", "string").required().with_default("unpaid"),
                Field::new("due_date", "date"),
                created_at(),
            ],
        },
    ]
}

fn default_relationships() -> Vec<RelationshipRule> {
    use crate::types::RelationshipKind;
    vec![
        RelationshipRule {
            from: "User".to_string(),
            to: "Order".to_string(),
            kind: RelationshipKind::OneToMany,
            foreign_key: "user_id".to_string(),
        },
        RelationshipRule {
            from: "User".to_string(),
            to: "Invoice".to_string(),
            kind: RelationshipKind::OneToMany,
            foreign_key: "customer_id".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    #[test]
    fn default_tables_compile() {
        let config = CompilerConfig::default();
        assert!(RuleSet::compile("domains", &config.domains).is_ok());
        assert!(RuleSet::compile("languages", &config.backend_languages).is_ok());
        assert!(RuleSet::compile("signals", &config.signals).is_ok());
        for (language, defs) in &config.frameworks {
            assert!(RuleSet::compile(language.as_str(), defs).is_ok());
        }
    }

    #[test]
    fn every_language_has_default_framework() {
        let config = CompilerConfig::default();
        for def in &config.backend_languages {
            assert!(
                config.defaults.framework_for(&def.category).is_some(),
                "missing framework default for {}",
                def.category
            );
        }
    }

    #[test]
    fn defaults_builder() {
        let defaults = CompilerDefaults::new()
            .with_backend_language("go")
            .with_database("mysql")
            .with_environments(vec!["prod".to_string()]);
        assert_eq!(defaults.backend_language, "go");
        assert_eq!(defaults.database, "mysql");
        assert_eq!(defaults.environments, vec!["prod".to_string()]);
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = CompilerConfig::from_toml_str(
            r#"
            [defaults]
            backend_language = "go"
            database = "mysql"

            [[domains]]
            category = "gaming"
            pattern = '\b(game|gaming)\b'
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.backend_language, "go");
        assert_eq!(config.defaults.database, "mysql");
        assert_eq!(config.defaults.p95_latency_ms, 500);
        assert_eq!(config.domains.len(), 1);
        assert_eq!(config.domains[0].category, "gaming");
        assert!(!config.entities.is_empty());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = CompilerConfig::from_toml_str("defaults = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
