use crate::expr::and_join;
use std::collections::BTreeMap;

/// Fixed name placeholders for the existence guard. Condition expressions use
/// their own `CE` namespace so they never collide with update or query
/// placeholders in a combined request.
const GUARD_PK_PLACEHOLDER: &str = "#CE_PK";
const GUARD_SK_PLACEHOLDER: &str = "#CE_SK";

///
/// CompiledCondition
///
/// Condition expression plus its name-placeholder map. The existence guard
/// carries no value placeholders.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledCondition {
    pub expression: String,
    pub names: BTreeMap<String, String>,
}

/// Existence-guard condition for creates: the write succeeds only if no
/// record currently occupies the target key.
#[must_use]
pub fn existence_guard(partition_key_attr: &str, sort_key_attr: &str) -> CompiledCondition {
    let clauses = [
        format!("attribute_not_exists({GUARD_PK_PLACEHOLDER})"),
        format!("attribute_not_exists({GUARD_SK_PLACEHOLDER})"),
    ];

    let mut names = BTreeMap::new();
    names.insert(
        GUARD_PK_PLACEHOLDER.to_string(),
        partition_key_attr.to_string(),
    );
    names.insert(GUARD_SK_PLACEHOLDER.to_string(), sort_key_attr.to_string());

    CompiledCondition {
        expression: and_join(&clauses),
        names,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_targets_the_given_key_attributes() {
        let guard = existence_guard("PK", "SK");

        assert_eq!(
            guard.expression,
            "(attribute_not_exists(#CE_PK)) AND (attribute_not_exists(#CE_SK))"
        );
        assert_eq!(guard.names.get("#CE_PK").unwrap(), "PK");
        assert_eq!(guard.names.get("#CE_SK").unwrap(), "SK");
    }
}
