
use crate::{
    error::Error,
    expr::{
        SortKeyCondition,
        condition::existence_guard,
        key_condition::compile_key_condition,
        update::compile_update,
    },
    model::{attribute::DefaultProvider, entity::EntityModel},
    registry::EntityRegistry,
    request::{
        DeleteRequest, GetRequest, PutRequest, QueryRequest, ReturnValues, TransactWriteBatch,
        TransactWriteItem, UpdateRequest,
    },
    unique,
    value::{AttributeValues, Item, Value},
};
use std::{collections::BTreeMap, sync::Arc};

///
/// RequestTransformer
///
/// Orchestrator: compiles entity metadata plus caller-supplied values into
/// ready-to-send request descriptions, one method per operation kind.
///
/// Stateless per call; the registry is immutable after construction, so a
/// transformer may be shared freely across threads.
///

#[derive(Clone, Debug)]
pub struct RequestTransformer {
    registry: Arc<EntityRegistry>,
}

impl RequestTransformer {
    #[must_use]
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self { registry }
    }

    /// Plain get-by-key request.
    pub fn to_get_request(&self, entity: &str, key_attrs: &AttributeValues) -> Result<GetRequest, Error> {
        let model = self.registry.get(entity)?;

        Ok(GetRequest {
            table_name: model.table.clone(),
            key: primary_key_item(model, key_attrs)?,
        })
    }

    /// Guarded create. Entities with unique attributes expand into a
    /// transactional batch of `1 + |unique attributes present|` Puts; all
    /// others stay a single Put with no transaction overhead.
    pub fn to_put_request(&self, entity: &str, attrs: &AttributeValues) -> Result<PutPlan, Error> {
        let model = self.registry.get(entity)?;

        let resolved = resolve_put_values(model, attrs);
        let item = build_item(model, &resolved)?;
        let guard = existence_guard(&model.partition_key_attr, &model.sort_key_attr);

        let main = PutRequest {
            table_name: model.table.clone(),
            item,
            condition_expression: Some(guard.expression),
            expression_attribute_names: Some(guard.names),
        };

        let markers = unique::creation_markers(model, &resolved)?;
        if markers.is_empty() {
            return Ok(PutPlan::Single(main));
        }

        let mut batch = TransactWriteBatch::default();
        batch.push(TransactWriteItem::Put(main));
        for marker in markers {
            batch.push(TransactWriteItem::Put(marker));
        }

        Ok(PutPlan::Transact(batch))
    }

    /// Update over a partial change set. When a changed attribute carries a
    /// uniqueness constraint the result is a deferred plan: the old shadow
    /// key cannot be derived until the caller supplies the pre-update
    /// snapshot.
    pub fn to_update_request(
        &self,
        entity: &str,
        key_attrs: &AttributeValues,
        changes: &AttributeValues,
    ) -> Result<UpdatePlan, Error> {
        let model = self.registry.get(entity)?;

        let key = primary_key_item(model, key_attrs)?;
        let assignments = update_assignments(model, key_attrs, changes)?;
        let expr = compile_update(&assignments);

        let unique_changed = unique::unique_attributes(model)
            .iter()
            .any(|attr| changes.contains_key(&attr.name));

        if !unique_changed {
            return Ok(UpdatePlan::Ready(UpdateRequest {
                table_name: model.table.clone(),
                key,
                update_expression: expr.expression,
                expression_attribute_names: expr.names,
                expression_attribute_values: expr.values,
                return_values: Some(ReturnValues::AllNew),
            }));
        }

        Ok(UpdatePlan::Deferred(DeferredUpdate {
            model: Arc::clone(model),
            key,
            expression: expr.expression,
            names: expr.names,
            values: expr.values,
            changes: changes.clone(),
        }))
    }

    /// Delete by key. Entities declaring any unique attribute defer: the
    /// marker keys depend on the live record's current values.
    pub fn to_delete_request(
        &self,
        entity: &str,
        key_attrs: &AttributeValues,
    ) -> Result<DeletePlan, Error> {
        let model = self.registry.get(entity)?;
        let key = primary_key_item(model, key_attrs)?;

        if unique::unique_attributes(model).is_empty() {
            return Ok(DeletePlan::Ready(DeleteRequest {
                table_name: model.table.clone(),
                key,
            }));
        }

        Ok(DeletePlan::Deferred(DeferredDelete {
            model: Arc::clone(model),
            key,
        }))
    }

    /// Query against the primary key or a named secondary index.
    pub fn to_query_request(
        &self,
        entity: &str,
        key_attrs: &AttributeValues,
        options: QueryOptions,
    ) -> Result<QueryRequest, Error> {
        let model = self.registry.get(entity)?;

        let (pk_attr, sk_attr, pk_template) = match &options.index {
            None => (
                model.partition_key_attr.as_str(),
                model.sort_key_attr.as_str(),
                &model.primary_key.partition_key,
            ),
            Some(name) => {
                let index = model
                    .index_model(name)
                    .ok_or_else(|| Error::unknown_index(name.clone()))?;
                (
                    index.partition_key_attr.as_str(),
                    index.sort_key_attr.as_str(),
                    &index.key.partition_key,
                )
            }
        };

        let pk_value = Value::Text(pk_template.compile(key_attrs)?);
        let sort_key = options
            .key_condition
            .map(|condition| (sk_attr, condition));

        let expr = compile_key_condition(pk_attr, pk_value, sort_key);

        Ok(QueryRequest {
            table_name: model.table.clone(),
            index_name: options.index,
            key_condition_expression: expr.expression,
            expression_attribute_names: expr.names,
            expression_attribute_values: expr.values,
            limit: options.limit,
            scan_index_forward: options.order.map(|order| order == QueryOrder::Asc),
        })
    }
}

///
/// QueryOptions
///

#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    /// Named secondary index; `None` queries the primary key.
    pub index: Option<String>,
    pub key_condition: Option<SortKeyCondition>,
    pub limit: Option<u32>,
    pub order: Option<QueryOrder>,
}

///
/// QueryOrder
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryOrder {
    Asc,
    Desc,
}

///
/// PutPlan
///

#[derive(Clone, Debug)]
pub enum PutPlan {
    Single(PutRequest),
    Transact(TransactWriteBatch),
}

///
/// UpdatePlan
///
/// Either a ready-to-send update or a deferred computation requiring the
/// caller to fetch the record's current attribute snapshot first.
///

#[derive(Clone, Debug)]
pub enum UpdatePlan {
    Ready(UpdateRequest),
    Deferred(DeferredUpdate),
}

impl UpdatePlan {
    #[must_use]
    pub const fn requires_prior_snapshot(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

///
/// DeferredUpdate
///
/// Lazy transaction loader for updates touching unique attributes. A pure
/// value: `finalize` may be invoked any number of times, on any thread, and
/// always yields the same batch for the same snapshot.
///

#[derive(Clone, Debug)]
pub struct DeferredUpdate {
    model: Arc<EntityModel>,
    key: Item,
    expression: String,
    names: BTreeMap<String, String>,
    values: Item,
    changes: AttributeValues,
}

impl DeferredUpdate {
    /// Produce the final batch from the pre-update attribute snapshot:
    /// `[Update(main), Put(new marker, guarded), Delete(old marker)]` per
    /// changed unique attribute, committed as one atomic unit.
    pub fn finalize(&self, prior: &AttributeValues) -> Result<TransactWriteBatch, Error> {
        let mut batch = TransactWriteBatch::default();

        batch.push(TransactWriteItem::Update(UpdateRequest {
            table_name: self.model.table.clone(),
            key: self.key.clone(),
            update_expression: self.expression.clone(),
            expression_attribute_names: self.names.clone(),
            expression_attribute_values: self.values.clone(),
            return_values: None,
        }));

        for marker_move in unique::update_markers(&self.model, &self.changes, prior)? {
            batch.push(TransactWriteItem::Put(marker_move.put_new));
            if let Some(delete_old) = marker_move.delete_old {
                batch.push(TransactWriteItem::Delete(delete_old));
            }
        }

        Ok(batch)
    }
}

///
/// DeletePlan
///

#[derive(Clone, Debug)]
pub enum DeletePlan {
    Ready(DeleteRequest),
    Deferred(DeferredDelete),
}

impl DeletePlan {
    #[must_use]
    pub const fn requires_prior_snapshot(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

///
/// DeferredDelete
///
/// Lazy transaction loader for deletes on entities with unique attributes.
///

#[derive(Clone, Debug)]
pub struct DeferredDelete {
    model: Arc<EntityModel>,
    key: Item,
}

impl DeferredDelete {
    /// Produce the final batch from the pre-delete snapshot: the main delete
    /// followed by one marker delete per unique attribute present.
    pub fn finalize(&self, prior: &AttributeValues) -> Result<TransactWriteBatch, Error> {
        let mut batch = TransactWriteBatch::default();

        batch.push(TransactWriteItem::Delete(DeleteRequest {
            table_name: self.model.table.clone(),
            key: self.key.clone(),
        }));

        for marker in unique::deletion_markers(&self.model, prior)? {
            batch.push(TransactWriteItem::Delete(marker));
        }

        Ok(batch)
    }
}

/// Compile the entity primary key into a physical key item.
fn primary_key_item(model: &EntityModel, values: &AttributeValues) -> Result<Item, Error> {
    let compiled = model.primary_key.compile(values)?;

    let mut key = Item::new();
    key.insert(
        model.partition_key_attr.clone(),
        Value::Text(compiled.partition_key),
    );
    key.insert(model.sort_key_attr.clone(), Value::Text(compiled.sort_key));

    Ok(key)
}

/// Resolve the full attribute set for a create: caller values, then static
/// defaults, then computed defaults (fed the full snapshot), then
/// auto-generated values for attributes not already set.
fn resolve_put_values(model: &EntityModel, attrs: &AttributeValues) -> AttributeValues {
    let mut resolved = attrs.clone();

    for attribute in &model.attributes {
        if resolved.contains_key(&attribute.name) {
            continue;
        }
        if let Some(DefaultProvider::Static(value)) = &attribute.default {
            resolved.insert(attribute.name.clone(), value.clone());
        }
    }

    for attribute in &model.attributes {
        if resolved.contains_key(&attribute.name) {
            continue;
        }
        if let Some(DefaultProvider::Computed(f)) = &attribute.default {
            let value = f(&resolved);
            resolved.insert(attribute.name.clone(), value);
        }
    }

    for attribute in &model.auto_generated {
        if !resolved.contains_key(&attribute.name) {
            resolved.insert(attribute.name.clone(), attribute.value.clone());
        }
    }

    resolved
}

/// Build the full record body: resolved attribute values plus compiled
/// primary and secondary index key attributes.
fn build_item(model: &EntityModel, resolved: &AttributeValues) -> Result<Item, Error> {
    let mut item = resolved.clone();

    let primary = model.primary_key.compile(resolved)?;
    item.insert(
        model.partition_key_attr.clone(),
        Value::Text(primary.partition_key),
    );
    item.insert(model.sort_key_attr.clone(), Value::Text(primary.sort_key));

    for index in &model.indexes {
        let compiled = index.key.compile(resolved)?;
        item.insert(
            index.partition_key_attr.clone(),
            Value::Text(compiled.partition_key),
        );
        item.insert(index.sort_key_attr.clone(), Value::Text(compiled.sort_key));
    }

    Ok(item)
}

/// Ordered `SET` assignments for an update: directly-changed attributes in
/// entity declaration order, then undeclared change names, then auto-update
/// generated attributes, then index key attributes recomputed from changed
/// fields. Placeholder indices run as one continuous sequence.
fn update_assignments(
    model: &EntityModel,
    key_attrs: &AttributeValues,
    changes: &AttributeValues,
) -> Result<Vec<(String, Value)>, Error> {
    let mut assignments: Vec<(String, Value)> = Vec::new();

    for attribute in &model.attributes {
        if let Some(value) = changes.get(&attribute.name) {
            assignments.push((attribute.name.clone(), value.clone()));
        }
    }

    for (name, value) in changes {
        if model.attribute_model(name).is_none() {
            assignments.push((name.clone(), value.clone()));
        }
    }

    for attribute in &model.auto_generated {
        if attribute.auto_update && !changes.contains_key(&attribute.name) {
            assignments.push((attribute.name.clone(), attribute.value.clone()));
        }
    }

    // Values visible to index-key recomputation: key attributes, the change
    // set, and any auto-update values applied above.
    let mut merged = key_attrs.clone();
    for (name, value) in &assignments {
        merged.insert(name.clone(), value.clone());
    }
    let changed_names: Vec<String> = assignments.iter().map(|(name, _)| name.clone()).collect();

    for index in &model.indexes {
        for (template, attr) in [
            (&index.key.partition_key, &index.partition_key_attr),
            (&index.key.sort_key, &index.sort_key_attr),
        ] {
            if template.references_any(changed_names.iter().map(String::as_str)) {
                let compiled = template.compile(&merged)?;
                assignments.push((attr.clone(), Value::Text(compiled)));
            }
        }
    }

    Ok(assignments)
}
