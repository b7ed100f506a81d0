//! REST surface

use super::Extractors;
use crate::types::{Api, ApiType, DataModel, Endpoint, Entity, HttpMethod};

impl Extractors {
    /// Five CRUD endpoints per extracted entity
    #[must_use]
    pub fn api(&self, text: &str, data: &DataModel) -> Api {
        let api_type = if self.signal("graphql", text) {
            ApiType::Graphql
        } else if self.signal("grpc", text) {
            ApiType::Grpc
        } else {
            ApiType::Rest
        };

        let base = self.defaults.api_base_path.trim_end_matches('/');
        let endpoints = data
            .entities
            .iter()
            .flat_map(|entity| {
                let plural = self
                    .plural_of(&entity.name)
                    .map_or_else(|| format!("{}s", entity.name.to_lowercase()), str::to_string);
                crud_endpoints(base, &plural, entity)
            })
            .collect();

        Api {
            api_type,
            base_path: self.defaults.api_base_path.clone(),
            endpoints,
        }
    }
}

fn crud_endpoints(base: &str, plural: &str, entity: &Entity) -> [Endpoint; 5] {
    let name = entity.name.as_str();
    let lower = name.to_lowercase();
    let collection = format!("{base}/{plural}");
    let item = format!("{collection}/{{id}}");

    let endpoint = |method: HttpMethod, path: &str, description: String, request: Option<String>, response: Option<String>, codes: &[u16]| Endpoint {
        method,
        path: path.to_string(),
        description,
        entity: name.to_string(),
        auth_required: true,
        request_schema: request,
        response_schema: response,
        status_codes: codes.to_vec(),
    };

    [
        endpoint(
            HttpMethod::Get,
            &collection,
            format!("List {plural}"),
            None,
            Some(format!("{name}[]")),
            &[200],
        ),
        endpoint(
            HttpMethod::Get,
            &item,
            format!("Get a {lower} by id"),
            None,
            Some(name.to_string()),
            &[200, 404],
        ),
        endpoint(
            HttpMethod::Post,
            &collection,
            format!("Create a {lower}"),
            Some(name.to_string()),
            Some(name.to_string()),
            &[201, 400],
        ),
        endpoint(
            HttpMethod::Put,
            &item,
            format!("Update a {lower}"),
            Some(name.to_string()),
            Some(name.to_string()),
            &[200, 400, 404],
        ),
        endpoint(
            HttpMethod::Delete,
            &item,
            format!("Delete a {lower}"),
            None,
            None,
            &[204, 404],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;

    #[test]
    fn five_endpoints_per_entity() {
        let ex = Extractors::new(&CompilerConfig::default()).unwrap();
        let data = ex.data_model("users and products");
        let api = ex.api("users and products", &data);
        assert_eq!(api.api_type, ApiType::Rest);
        assert_eq!(api.endpoints.len(), 10);

        let paths: Vec<(HttpMethod, &str)> = api.endpoints[..5]
            .iter()
            .map(|e| (e.method, e.path.as_str()))
            .collect();
        assert_eq!(
            paths,
            [
                (HttpMethod::Get, "/api/v1/users"),
                (HttpMethod::Get, "/api/v1/users/{id}"),
                (HttpMethod::Post, "/api/v1/users"),
                (HttpMethod::Put, "/api/v1/users/{id}"),
                (HttpMethod::Delete, "/api/v1/users/{id}"),
            ]
        );
        assert!(api.endpoints.iter().all(|e| e.auth_required));
        assert_eq!(api.endpoints[2].status_codes, [201, 400]);
        assert_eq!(api.endpoints[0].response_schema.as_deref(), Some("User[]"));
        assert!(api.endpoints[4].response_schema.is_none());
        assert_eq!(api.endpoints[5].entity, "Product");
    }

    #[test]
    fn no_entities_no_endpoints() {
        let ex = Extractors::new(&CompilerConfig::default()).unwrap();
        let api = ex.api("a graphql gateway", &DataModel::default());
        assert_eq!(api.api_type, ApiType::Graphql);
        assert!(api.endpoints.is_empty());
        assert_eq!(api.base_path, "/api/v1");
    }
}
