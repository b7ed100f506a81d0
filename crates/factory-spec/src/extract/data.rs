//! Entities and relationships

use super::Extractors;
use crate::config::EntityTemplate;
use crate::types::{Constraint, ConstraintKind, DataModel, Entity, Relationship};

impl Extractors {
    /// Entities from the template table and the relationships between them
    #[must_use]
    pub fn data_model(&self, text: &str) -> DataModel {
        let mut entities = self.entities(text);
        let relationships = self.relationships(&entities);

        for rel in &relationships {
            let Some(plural) = self.plural_of(&rel.to) else {
                continue;
            };
            if let Some(target) = entities.iter_mut().find(|e| e.name == rel.to) {
                target.constraints.push(Constraint {
                    name: format!("fk_{plural}_{}", rel.foreign_key),
                    kind: ConstraintKind::ForeignKey,
                    fields: vec![rel.foreign_key.clone()],
                });
            }
        }

        DataModel {
            entities,
            relationships,
        }
    }

    /// Entities whose pattern matches, once each, in template order
    #[must_use]
    pub fn entities(&self, text: &str) -> Vec<Entity> {
        let mut out: Vec<Entity> = Vec::new();
        for (template, regex) in &self.entities {
            if regex.is_match(text) && !out.iter().any(|e| e.name == template.name) {
                out.push(entity_from(template));
            }
        }
        out
    }

    /// Relationship rules whose endpoints were both extracted
    #[must_use]
    pub fn relationships(&self, entities: &[Entity]) -> Vec<Relationship> {
        let present = |name: &str| entities.iter().any(|e| e.name == name);
        self.relationships
            .iter()
            .filter(|rule| present(&rule.from) && present(&rule.to))
            .map(|rule| Relationship {
                from: rule.from.clone(),
                to: rule.to.clone(),
                kind: rule.kind,
                foreign_key: rule.foreign_key.clone(),
            })
            .collect()
    }

    /// Plural resource segment for an entity name
    #[must_use]
    pub fn plural_of(&self, entity: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|(t, _)| t.name == entity)
            .map(|(t, _)| t.plural.as_str())
    }
}

fn entity_from(template: &EntityTemplate) -> Entity {
    let plural = &template.plural;
    let mut constraints = vec![Constraint {
        name: format!("pk_{plural}"),
        kind: ConstraintKind::PrimaryKey,
        fields: vec!["id".to_string()],
    }];
    constraints.extend(
        template
            .fields
            .iter()
            .filter(|f| f.unique && f.name != "id")
            .map(|f| Constraint {
                name: format!("uq_{plural}_{}", f.name),
                kind: ConstraintKind::Unique,
                fields: vec![f.name.clone()],
            }),
    );

    Entity {
        name: template.name.clone(),
        description: template.description.clone(),
        fields: template.fields.clone(),
        constraints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::types::RelationshipKind;

    fn ex() -> Extractors {
        Extractors::new(&CompilerConfig::default()).unwrap()
    }

    #[test]
    fn entities_once_in_template_order() {
        let data = ex().data_model("orders and orders placed by users, users, users");
        assert_eq!(data.entity_names(), ["User", "Order"]);
    }

    #[test]
    fn every_entity_has_primary_key_on_id() {
        let data = ex().data_model("users buy products via orders and get invoices");
        assert_eq!(data.entities.len(), 4);
        for entity in &data.entities {
            let pk = &entity.constraints[0];
            assert_eq!(pk.kind, ConstraintKind::PrimaryKey);
            assert_eq!(pk.fields, ["id"]);
            assert_eq!(entity.fields[0].name, "id");
        }
    }

    #[test]
    fn unique_fields_get_constraints() {
        let data = ex().data_model("a user directory");
        let user = data.entity("User").unwrap();
        assert!(user
            .constraints
            .iter()
            .any(|c| c.name == "uq_users_email" && c.kind == ConstraintKind::Unique));
    }

    #[test]
    fn relationships_need_both_endpoints() {
        let ex = ex();
        assert!(ex.data_model("a list of orders").relationships.is_empty());

        let data = ex.data_model("users place orders and pay invoices");
        assert_eq!(data.relationships.len(), 2);
        assert_eq!(data.relationships[0].foreign_key, "user_id");
        assert_eq!(data.relationships[0].kind, RelationshipKind::OneToMany);
        assert_eq!(data.relationships[1].to, "Invoice");
        assert_eq!(data.relationships[1].foreign_key, "customer_id");

        let order = data.entity("Order").unwrap();
        assert!(order
            .constraints
            .iter()
            .any(|c| c.kind == ConstraintKind::ForeignKey && c.fields == ["user_id"]));
    }

    #[test]
    fn nothing_matches() {
        let data = ex().data_model("a weather widget");
        assert!(data.entities.is_empty());
        assert!(data.relationships.is_empty());
    }
}
