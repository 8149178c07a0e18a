//! Uniqueness emulation.
//!
//! The store has no native unique-index concept. A uniqueness constraint is
//! emulated with a shadow marker record whose own primary key encodes the
//! constrained value; the marker's existence is the constraint proof. Every
//! operation that creates, moves, or removes a marker is bundled into the
//! same transactional batch as the main record so a half-applied state is
//! never observable.

use crate::{
    error::Error,
    expr::condition::existence_guard,
    key::KeyTemplatePair,
    model::{attribute::UniqueConstraint, entity::EntityModel},
    request::{DeleteRequest, PutRequest},
    value::{AttributeValues, Item, Value},
};

///
/// UniqueAttribute
///
/// One unique attribute together with its resolved shadow-key template.
///

#[derive(Clone, Debug)]
pub struct UniqueAttribute {
    pub name: String,
    pub key: KeyTemplatePair,
}

/// Default shadow-key template: `<ENTITY_UPPER>.<ATTR_UPPER>#{{attr}}`, used
/// identically for partition and sort key.
#[must_use]
pub fn derived_shadow_template(entity_name: &str, attribute: &str) -> KeyTemplatePair {
    let template = format!(
        "{}.{}#{{{{{attribute}}}}}",
        entity_name.to_uppercase(),
        attribute.to_uppercase()
    );

    KeyTemplatePair::new(template.clone(), template)
}

/// All unique attributes of an entity with their shadow-key templates, in
/// declaration order. Auto-generated attributes flagged unique always use the
/// derived template form.
#[must_use]
pub fn unique_attributes(entity: &EntityModel) -> Vec<UniqueAttribute> {
    let mut attrs = Vec::new();

    for attribute in entity.unique_attributes() {
        let key = match &attribute.unique {
            Some(UniqueConstraint::Explicit(pair)) => pair.clone(),
            _ => derived_shadow_template(&entity.name, &attribute.name),
        };

        attrs.push(UniqueAttribute {
            name: attribute.name.clone(),
            key,
        });
    }

    for attribute in &entity.auto_generated {
        if attribute.unique {
            attrs.push(UniqueAttribute {
                name: attribute.name.clone(),
                key: derived_shadow_template(&entity.name, &attribute.name),
            });
        }
    }

    attrs
}

/// Marker record for one unique attribute: key attributes only, no payload,
/// guarded by the existence condition.
fn marker_put(entity: &EntityModel, key: &KeyTemplatePair, values: &AttributeValues) -> Result<PutRequest, Error> {
    let compiled = key.compile(values)?;
    let guard = existence_guard(&entity.partition_key_attr, &entity.sort_key_attr);

    let mut item = Item::new();
    item.insert(
        entity.partition_key_attr.clone(),
        Value::Text(compiled.partition_key),
    );
    item.insert(entity.sort_key_attr.clone(), Value::Text(compiled.sort_key));

    Ok(PutRequest {
        table_name: entity.table.clone(),
        item,
        condition_expression: Some(guard.expression),
        expression_attribute_names: Some(guard.names),
    })
}

fn marker_delete(entity: &EntityModel, key: &KeyTemplatePair, values: &AttributeValues) -> Result<DeleteRequest, Error> {
    let compiled = key.compile(values)?;

    let mut item = Item::new();
    item.insert(
        entity.partition_key_attr.clone(),
        Value::Text(compiled.partition_key),
    );
    item.insert(entity.sort_key_attr.clone(), Value::Text(compiled.sort_key));

    Ok(DeleteRequest {
        table_name: entity.table.clone(),
        key: item,
    })
}

/// Guarded marker Puts for a create, one per unique attribute whose value is
/// present in the resolved item. Absent unique attributes get no marker.
pub fn creation_markers(
    entity: &EntityModel,
    values: &AttributeValues,
) -> Result<Vec<PutRequest>, Error> {
    let mut markers = Vec::new();

    for unique in unique_attributes(entity) {
        if values.get(&unique.name).is_none_or(Value::is_null) {
            continue;
        }
        markers.push(marker_put(entity, &unique.key, values)?);
    }

    Ok(markers)
}

///
/// MarkerMove
///
/// New guarded marker plus (when an old value existed) the old marker's
/// removal, for one changed unique attribute.
///

#[derive(Clone, Debug)]
pub struct MarkerMove {
    pub put_new: PutRequest,
    pub delete_old: Option<DeleteRequest>,
}

/// Marker moves for an update: for each unique attribute among the changed
/// set, create the new marker from the post-update view and remove the old
/// marker derived from the pre-update snapshot. A unique attribute with no
/// prior value has no old marker to remove.
pub fn update_markers(
    entity: &EntityModel,
    changes: &AttributeValues,
    prior: &AttributeValues,
) -> Result<Vec<MarkerMove>, Error> {
    // Post-update view: changes layered over the prior snapshot, so explicit
    // shadow templates can reference unchanged attributes.
    let mut updated = prior.clone();
    for (name, value) in changes {
        updated.insert(name.clone(), value.clone());
    }

    let mut moves = Vec::new();

    for unique in unique_attributes(entity) {
        if !changes.contains_key(&unique.name) {
            continue;
        }

        let put_new = marker_put(entity, &unique.key, &updated)?;
        let delete_old = if prior.get(&unique.name).is_none_or(Value::is_null) {
            None
        } else {
            Some(marker_delete(entity, &unique.key, prior)?)
        };

        moves.push(MarkerMove {
            put_new,
            delete_old,
        });
    }

    Ok(moves)
}

/// Marker Deletes for an entity delete, derived from the pre-delete snapshot.
/// Unique attributes absent from the snapshot never had a marker.
pub fn deletion_markers(
    entity: &EntityModel,
    prior: &AttributeValues,
) -> Result<Vec<DeleteRequest>, Error> {
    let mut markers = Vec::new();

    for unique in unique_attributes(entity) {
        if prior.get(&unique.name).is_none_or(Value::is_null) {
            continue;
        }
        markers.push(marker_delete(entity, &unique.key, prior)?);
    }

    Ok(markers)
}

///
/// TESTS
///
