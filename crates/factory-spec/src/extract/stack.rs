//! Technology stack

use super::Extractors;
use crate::types::{AppType, Backend, Cache, Database, Frontend, TechStack};

impl Extractors {
    /// Backend, frontend (web only), database and optional cache
    #[must_use]
    pub fn tech_stack(&self, text: &str, app_type: AppType) -> TechStack {
        let language = self
            .languages
            .first_category(text)
            .unwrap_or(&self.defaults.backend_language)
            .to_string();

        let framework = self
            .frameworks
            .get(&language)
            .and_then(|set| set.first_category(text))
            .or_else(|| self.defaults.framework_for(&language))
            .unwrap_or_default()
            .to_string();

        let frontend = (app_type == AppType::Web).then(|| Frontend {
            framework: self
                .frontend_frameworks
                .first_category(text)
                .unwrap_or(&self.defaults.frontend_framework)
                .to_string(),
            language: self.defaults.frontend_language.clone(),
            styling: self.defaults.frontend_styling.clone(),
        });

        let database = Database {
            kind: self
                .databases
                .first_category(text)
                .unwrap_or(&self.defaults.database)
                .to_string(),
        };

        let cache = self.signal("cache", text).then(|| Cache {
            kind: self.defaults.cache.clone(),
        });

        tracing::debug!(%language, %framework, database = %database.kind, "tech stack");

        TechStack {
            backend: Backend { language, framework },
            frontend,
            database,
            cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompilerConfig, CompilerDefaults};

    fn ex() -> Extractors {
        Extractors::new(&CompilerConfig::default()).unwrap()
    }

    #[test]
    fn defaults_when_brief_is_silent() {
        let stack = ex().tech_stack("a todo list", AppType::Web);
        assert_eq!(stack.backend.language, "python");
        assert_eq!(stack.backend.framework, "fastapi");
        assert_eq!(stack.database.kind, "postgresql");
        assert!(stack.cache.is_none());
        let frontend = stack.frontend.unwrap();
        assert_eq!(frontend.framework, "react");
        assert_eq!(frontend.language, "typescript");
    }

    #[test]
    fn framework_depends_on_language() {
        let ex = ex();
        let stack = ex.tech_stack("a django site backed by mysql", AppType::Web);
        assert_eq!(stack.backend.language, "python");
        assert_eq!(stack.backend.framework, "django");
        assert_eq!(stack.database.kind, "mysql");

        let stack = ex.tech_stack("written in golang with echo", AppType::Api);
        assert_eq!(stack.backend.language, "go");
        assert_eq!(stack.backend.framework, "echo");

        let stack = ex.tech_stack("a rust service", AppType::Api);
        assert_eq!(stack.backend.framework, "axum");
    }

    #[test]
    fn frontend_only_for_web() {
        let ex = ex();
        assert!(ex.tech_stack("a vue dashboard", AppType::Api).frontend.is_none());
        assert!(ex.tech_stack("a mobile client", AppType::Mobile).frontend.is_none());
        let frontend = ex.tech_stack("a vue dashboard", AppType::Web).frontend.unwrap();
        assert_eq!(frontend.framework, "vue");
    }

    #[test]
    fn cache_only_when_mentioned() {
        let stack = ex().tech_stack("cache hot queries", AppType::Api);
        assert_eq!(stack.cache.unwrap().kind, "redis");
    }

    #[test]
    fn configured_defaults_apply() {
        let config = CompilerConfig::default()
            .with_defaults(CompilerDefaults::new().with_backend_language("java").with_database("sqlite"));
        let stack = Extractors::new(&config).unwrap().tech_stack("a notes app", AppType::Api);
        assert_eq!(stack.backend.language, "java");
        assert_eq!(stack.backend.framework, "spring-boot");
        assert_eq!(stack.database.kind, "sqlite");
    }
}
