//! App name, type and domain

use super::Extractors;
use crate::types::AppType;

impl Extractors {
    /// App type: explicit markers first, then secondary signals, then default
    #[must_use]
    pub fn app_type(&self, text: &str) -> AppType {
        self.app_type_markers
            .first_category(text)
            .or_else(|| self.app_type_signals.first_category(text))
            .and_then(|c| c.parse().ok())
            .unwrap_or(self.default_app_type)
    }

    /// Domain from the domain table; the heaviest match wins and table
    /// order breaks ties
    #[must_use]
    pub fn domain(&self, text: &str) -> String {
        self.domains
            .best_category(text)
            .unwrap_or(&self.defaults.domain)
            .to_string()
    }

    /// App name: explicit naming, else domain plus type, else placeholder
    #[must_use]
    pub fn app_name(&self, text: &str, domain: &str, app_type: AppType) -> String {
        let explicit = self
            .name_patterns
            .iter()
            .filter_map(|re| re.captures(text))
            .filter_map(|caps| caps.get(1))
            .map(|m| slugify(m.as_str()))
            .find(|name| !name.is_empty());
        if let Some(name) = explicit {
            tracing::debug!(%name, "explicit app name");
            return name;
        }

        if domain != self.defaults.domain {
            let suffix = match app_type {
                AppType::Api => "api",
                AppType::Web => "web-app",
                AppType::Mobile => "mobile-app",
                AppType::Cli => "cli",
                AppType::Desktop => "desktop-app",
            };
            return format!("{domain}-{suffix}");
        }

        self.defaults.placeholder_name.clone()
    }
}

/// Lower-case ASCII slug with single hyphens
fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
