use crate::{
    error::Error,
    key::KeyTemplate,
    model::{attribute::DefaultProvider, entity::EntityModel},
};
use std::{collections::HashMap, sync::Arc};

///
/// EntityRegistry
///
/// Name → entity metadata lookup consumed by the transformer. Populated once
/// during setup and immutable thereafter; registration validates the model's
/// template invariants so every later compilation can trust them.
///

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Arc<EntityModel>>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register an entity model. Rejects duplicate names and
    /// templates whose placeholders reference undeclared attributes.
    pub fn register(&mut self, model: EntityModel) -> Result<(), Error> {
        if self.entities.contains_key(&model.name) {
            return Err(Error::EntityAlreadyRegistered {
                entity: model.name.clone(),
            });
        }

        validate_templates(&model)?;
        validate_defaults(&model)?;

        self.entities.insert(model.name.clone(), Arc::new(model));

        Ok(())
    }

    pub fn get(&self, entity: &str) -> Result<&Arc<EntityModel>, Error> {
        self.entities
            .get(entity)
            .ok_or_else(|| Error::entity_not_registered(entity))
    }

    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }
}

/// Every placeholder in every template must reference a declared attribute.
fn validate_templates(model: &EntityModel) -> Result<(), Error> {
    let check = |template: &KeyTemplate| -> Result<(), Error> {
        for reference in template.references() {
            if !model.declares(reference) {
                return Err(Error::UndeclaredTemplateAttribute {
                    template: template.source().to_string(),
                    attribute: reference.to_string(),
                });
            }
        }
        Ok(())
    };

    check(&model.primary_key.partition_key)?;
    check(&model.primary_key.sort_key)?;

    for index in &model.indexes {
        check(&index.key.partition_key)?;
        check(&index.key.sort_key)?;
    }

    for attribute in &model.attributes {
        if let Some(crate::model::attribute::UniqueConstraint::Explicit(pair)) = &attribute.unique {
            check(&pair.partition_key)?;
            check(&pair.sort_key)?;
        }
    }

    Ok(())
}

/// Static defaults must satisfy the attribute's declared kind.
fn validate_defaults(model: &EntityModel) -> Result<(), Error> {
    for attribute in &model.attributes {
        if let Some(DefaultProvider::Static(value)) = &attribute.default
            && !attribute.kind.matches(value)
        {
            return Err(Error::DefaultKindMismatch {
                attribute: attribute.name.clone(),
                kind: attribute.kind.to_string(),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::KeyTemplatePair,
        model::attribute::{AttributeKind, AttributeModel},
        value::Value,
    };

    fn user_model() -> EntityModel {
        EntityModel::new("user", "test-table", KeyTemplatePair::new("USER#{{id}}", "USER#{{id}}"))
            .attribute(AttributeModel::new("id", AttributeKind::Text))
    }

    #[test]
    fn registers_and_resolves() {
        let mut registry = EntityRegistry::new();
        registry.register(user_model()).unwrap();

        assert!(registry.contains("user"));
        assert_eq!(registry.get("user").unwrap().table, "test-table");
    }

    #[test]
    fn unregistered_entity_fails_lookup() {
        let registry = EntityRegistry::new();
        let err = registry.get("ghost").unwrap_err();

        assert_eq!(
            err,
            Error::EntityNotRegistered {
                entity: "ghost".to_string()
            }
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = EntityRegistry::new();
        registry.register(user_model()).unwrap();

        let err = registry.register(user_model()).unwrap_err();
        assert_eq!(
            err,
            Error::EntityAlreadyRegistered {
                entity: "user".to_string()
            }
        );
    }

    #[test]
    fn template_referencing_undeclared_attribute_is_rejected() {
        let model = EntityModel::new(
            "user",
            "test-table",
            KeyTemplatePair::new("USER#{{id}}", "USER#{{missing}}"),
        )
        .attribute(AttributeModel::new("id", AttributeKind::Text));

        let err = EntityRegistry::new().register(model).unwrap_err();
        assert_eq!(
            err,
            Error::UndeclaredTemplateAttribute {
                template: "USER#{{missing}}".to_string(),
                attribute: "missing".to_string()
            }
        );
    }

    #[test]
    fn mismatched_static_default_is_rejected() {
        let model = user_model()
            .attribute(AttributeModel::new("age", AttributeKind::Uint).with_default(Value::Text("old".into())));

        let err = EntityRegistry::new().register(model).unwrap_err();
        assert!(matches!(err, Error::DefaultKindMismatch { .. }));
    }
}
