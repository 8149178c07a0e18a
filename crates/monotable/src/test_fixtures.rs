//! Shared entity fixtures for transformer-level tests.

use crate::{
    key::KeyTemplatePair,
    model::{
        attribute::{AttributeKind, AttributeModel},
        autogen::{AutoGeneratedAttributeModel, DefaultGenerator, GenerationStrategy},
        entity::EntityModel,
        index::IndexModel,
    },
    registry::EntityRegistry,
    value::{AttributeValues, Value},
};
use std::sync::Arc;

/// `user`: plain entity with a status-driven GSI, no unique attributes.
pub(crate) fn user_entity() -> EntityModel {
    EntityModel::new(
        "user",
        "test-table",
        KeyTemplatePair::new("USER#{{id}}", "USER#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("name", AttributeKind::Text))
    .attribute(AttributeModel::new("status", AttributeKind::Text))
    .index(IndexModel::new(
        "GSI1",
        "GSI1PK",
        "GSI1SK",
        KeyTemplatePair::new("USER#STATUS#{{status}}", "USER#{{name}}"),
    ))
}

/// `customer`: composite sort key built from a second attribute.
pub(crate) fn customer_entity() -> EntityModel {
    EntityModel::new(
        "customer",
        "test-table",
        KeyTemplatePair::new("CUS#{{id}}", "CUS#{{email}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("email", AttributeKind::Text))
}

/// `account`: unique email (derived shadow template) plus a GSI whose sort
/// key derives from `name`.
pub(crate) fn account_entity() -> EntityModel {
    EntityModel::new(
        "account",
        "test-table",
        KeyTemplatePair::new("ACC#{{id}}", "ACC#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("name", AttributeKind::Text))
    .attribute(AttributeModel::new("email", AttributeKind::Text).unique())
    .attribute(AttributeModel::new("status", AttributeKind::Text))
    .index(IndexModel::new(
        "GSI1",
        "GSI1PK",
        "GSI1SK",
        KeyTemplatePair::new("ACC#STATUS#{{status}}", "ACC#{{name}}"),
    ))
}

fn full_name(values: &AttributeValues) -> Value {
    let part = |name: &str| match values.get(name) {
        Some(Value::Text(text)) => text.clone(),
        _ => String::new(),
    };

    Value::Text(format!("{} {}", part("firstName"), part("lastName")))
}

/// `person`: computed default deriving `name` from two other fields.
pub(crate) fn person_entity() -> EntityModel {
    EntityModel::new(
        "person",
        "test-table",
        KeyTemplatePair::new("PER#{{id}}", "PER#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("firstName", AttributeKind::Text))
    .attribute(AttributeModel::new("lastName", AttributeKind::Text))
    .attribute(AttributeModel::new("name", AttributeKind::Text).with_computed_default(full_name))
}

/// `product`: static default for `status`.
pub(crate) fn product_entity() -> EntityModel {
    EntityModel::new(
        "product",
        "test-table",
        KeyTemplatePair::new("PRD#{{id}}", "PRD#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("status", AttributeKind::Text).with_default("available"))
}

/// `note`: auto-generated `updatedAt` regenerated on every update.
pub(crate) fn note_entity() -> EntityModel {
    EntityModel::new(
        "note",
        "test-table",
        KeyTemplatePair::new("NOTE#{{id}}", "NOTE#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .attribute(AttributeModel::new("title", AttributeKind::Text))
    .auto_generated(
        AutoGeneratedAttributeModel::new("updatedAt", GenerationStrategy::IsoDate, &DefaultGenerator)
            .auto_update(),
    )
}

/// `ticket`: unique auto-generated code.
pub(crate) fn ticket_entity() -> EntityModel {
    EntityModel::new(
        "ticket",
        "test-table",
        KeyTemplatePair::new("TIC#{{id}}", "TIC#{{id}}"),
    )
    .attribute(AttributeModel::new("id", AttributeKind::Text))
    .auto_generated(
        AutoGeneratedAttributeModel::new("code", GenerationStrategy::Ulid, &DefaultGenerator).unique(),
    )
}

pub(crate) fn test_registry() -> Arc<EntityRegistry> {
    let mut registry = EntityRegistry::new();
    for entity in [
        user_entity(),
        customer_entity(),
        account_entity(),
        person_entity(),
        product_entity(),
        note_entity(),
        ticket_entity(),
    ] {
        registry.register(entity).expect("fixture registration");
    }

    Arc::new(registry)
}
