//! Expression compilation.
//!
//! Three independent compilation modes, each with its own placeholder
//! namespace so a combined request can never collide: the existence-guard
//! condition (`#CE_*`), the update expression (`#attrN` / `:valN`), and the
//! query key condition (`#KY_CE_*` / `:KY_CE_*`).

pub mod condition;
pub mod key_condition;
pub mod update;

pub use key_condition::SortKeyCondition;

use crate::value::Value;
use std::collections::BTreeMap;

///
/// CompiledExpression
///
/// Expression string plus its placeholder maps: name-placeholder → physical
/// attribute name, value-placeholder → value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledExpression {
    pub expression: String,
    pub names: BTreeMap<String, String>,
    pub values: BTreeMap<String, Value>,
}

/// Compose clauses with `AND`. A single clause is emitted unwrapped;
/// multi-clause compositions parenthesize each clause.
pub(crate) fn and_join(clauses: &[String]) -> String {
    match clauses {
        [single] => single.clone(),
        many => many
            .iter()
            .map(|clause| format!("({clause})"))
            .collect::<Vec<_>>()
            .join(" AND "),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_clause_is_unwrapped() {
        assert_eq!(and_join(&["a = b".to_string()]), "a = b");
    }

    #[test]
    fn multi_clause_wraps_each_side() {
        assert_eq!(
            and_join(&["a = b".to_string(), "c = d".to_string()]),
            "(a = b) AND (c = d)"
        );
    }
}
