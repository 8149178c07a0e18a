use crate::{
    expr::{CompiledExpression, and_join},
    value::Value,
};
use std::collections::BTreeMap;

/// Key-condition placeholders use the `KY_CE` namespace, suffixed with the
/// physical key attribute name they bind (`#KY_CE_PK`, `#KY_CE_GSI1SK`, …).
const NAMESPACE: &str = "KY_CE";

///
/// SortKeyCondition
///
/// Optional sort-key clause of a query key condition.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SortKeyCondition {
    Eq(Value),
    BeginsWith(Value),
    Between(Value, Value),
}

/// Compile a query key-condition expression: a mandatory equality clause on
/// the partition key, optionally followed by a sort-key clause.
#[must_use]
pub fn compile_key_condition(
    partition_key_attr: &str,
    partition_key_value: Value,
    sort_key: Option<(&str, SortKeyCondition)>,
) -> CompiledExpression {
    let mut clauses = Vec::with_capacity(2);
    let mut names = BTreeMap::new();
    let mut values = BTreeMap::new();

    let pk_name = format!("#{NAMESPACE}_{partition_key_attr}");
    let pk_value = format!(":{NAMESPACE}_{partition_key_attr}");

    clauses.push(format!("{pk_name} = {pk_value}"));
    names.insert(pk_name, partition_key_attr.to_string());
    values.insert(pk_value, partition_key_value);

    if let Some((sort_key_attr, condition)) = sort_key {
        let sk_name = format!("#{NAMESPACE}_{sort_key_attr}");
        let sk_value = format!(":{NAMESPACE}_{sort_key_attr}");

        names.insert(sk_name.clone(), sort_key_attr.to_string());

        match condition {
            SortKeyCondition::Eq(value) => {
                clauses.push(format!("{sk_name} = {sk_value}"));
                values.insert(sk_value, value);
            }
            SortKeyCondition::BeginsWith(value) => {
                clauses.push(format!("begins_with({sk_name}, {sk_value})"));
                values.insert(sk_value, value);
            }
            SortKeyCondition::Between(start, end) => {
                clauses.push(format!(
                    "{sk_name} BETWEEN {sk_value}_start AND {sk_value}_end"
                ));
                values.insert(format!("{sk_value}_start"), start);
                values.insert(format!("{sk_value}_end"), end);
            }
        }
    }

    CompiledExpression {
        expression: and_join(&clauses),
        names,
        values,
    }
}

///
/// TESTS
///
