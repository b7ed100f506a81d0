//! UI pages and delivery settings

use super::Extractors;
use crate::types::{AppType, DataModel, Ops, Page, Scale, ScaleTier, Ui};

impl Extractors {
    /// Dashboard plus list and detail pages per entity, for apps with pages
    #[must_use]
    pub fn ui(&self, app_type: AppType, data: &DataModel) -> Ui {
        if !app_type.has_pages() {
            return Ui::default();
        }

        let mut pages = vec![Page {
            name: "Dashboard".to_string(),
            route: "/".to_string(),
            components: components(&["navigation", "summary-cards", "activity-feed"]),
        }];
        for entity in &data.entities {
            let plural = self.plural_of(&entity.name).unwrap_or(&entity.name).to_lowercase();
            pages.push(Page {
                name: format!("{} List", entity.name),
                route: format!("/{plural}"),
                components: components(&["data-table", "filters", "pagination"]),
            });
            pages.push(Page {
                name: format!("{} Detail", entity.name),
                route: format!("/{plural}/:id"),
                components: components(&["detail-view", "edit-form"]),
            });
        }

        Ui {
            pages,
            responsive: true,
            accessibility: Some(self.defaults.accessibility.clone()),
        }
    }

    /// Environments, runtime and scaling
    #[must_use]
    pub fn ops(&self, text: &str, scale: &Scale) -> Ops {
        Ops {
            environments: self.defaults.environments.clone(),
            container_runtime: self.defaults.container_runtime.clone(),
            orchestrator: self.signal("kubernetes", text).then(|| "kubernetes".to_string()),
            ci_provider: self.defaults.ci_provider.clone(),
            autoscaling: scale.tier == ScaleTier::Enterprise,
        }
    }
}

fn components(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}
