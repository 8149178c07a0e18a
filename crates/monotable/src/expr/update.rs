use crate::{expr::CompiledExpression, value::Value};
use std::collections::BTreeMap;

/// Compile a `SET` update expression over an ordered list of
/// `(physical attribute name, value)` assignments.
///
/// Placeholder indices are assigned sequentially from zero in the order
/// given. Callers supply directly-changed attributes in entity declaration
/// order first, followed by derived index-key attributes, so the sequence is
/// stable regardless of call-site argument order.
#[must_use]
pub fn compile_update(assignments: &[(String, Value)]) -> CompiledExpression {
    let mut clauses = Vec::with_capacity(assignments.len());
    let mut names = BTreeMap::new();
    let mut values = BTreeMap::new();

    for (index, (attribute, value)) in assignments.iter().enumerate() {
        let name_placeholder = format!("#attr{index}");
        let value_placeholder = format!(":val{index}");

        clauses.push(format!("{name_placeholder} = {value_placeholder}"));
        names.insert(name_placeholder, attribute.clone());
        values.insert(value_placeholder, value.clone());
    }

    CompiledExpression {
        expression: format!("SET {}", clauses.join(", ")),
        names,
        values,
    }
}

///
/// TESTS
///
