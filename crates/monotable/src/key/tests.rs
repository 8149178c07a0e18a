use super::*;
use crate::value::{AttributeValues, Value, attribute_values};
use proptest::prelude::*;

#[test]
fn compiles_literal_and_placeholder_segments() {
    let template = KeyTemplate::parse("USER#{{id}}#STATUS#{{status}}");
    let values = attribute_values([("id", "1"), ("status", "active")]);

    assert_eq!(template.compile(&values).unwrap(), "USER#1#STATUS#active");
}

#[test]
fn compiles_pure_literal_template() {
    let template = KeyTemplate::parse("USERS");
    assert_eq!(template.compile(&AttributeValues::new()).unwrap(), "USERS");
}

#[test]
fn trims_placeholder_whitespace() {
    let template = KeyTemplate::parse("USER#{{ id }}");
    let values = attribute_values([("id", "9")]);

    assert_eq!(template.compile(&values).unwrap(), "USER#9");
}

#[test]
fn unterminated_placeholder_stays_literal() {
    let template = KeyTemplate::parse("USER#{{id");
    assert_eq!(
        template.compile(&AttributeValues::new()).unwrap(),
        "USER#{{id"
    );
}

#[test]
fn missing_attribute_fails() {
    let template = KeyTemplate::parse("USER#{{id}}");
    let err = template
        .compile(&attribute_values([("name", "Tito")]))
        .unwrap_err();

    assert_eq!(
        err,
        Error::MissingAttributeValue {
            attribute: "id".to_string()
        }
    );
}

#[test]
fn null_value_counts_as_missing() {
    let template = KeyTemplate::parse("USER#{{id}}");
    let err = template
        .compile(&attribute_values([("id", Value::Null)]))
        .unwrap_err();

    assert!(matches!(err, Error::MissingAttributeValue { .. }));
}

#[test]
fn references_lists_placeholders_in_order() {
    let pair = KeyTemplatePair::new("USER#STATUS#{{status}}", "USER#{{name}}");
    let refs: Vec<&str> = pair.references().collect();

    assert_eq!(refs, ["status", "name"]);
}

#[test]
fn pair_compiles_both_halves_in_one_pass() {
    let pair = KeyTemplatePair::new("USER#{{id}}", "USER#{{id}}");
    let compiled = pair.compile(&attribute_values([("id", "1")])).unwrap();

    assert_eq!(compiled.partition_key, "USER#1");
    assert_eq!(compiled.sort_key, "USER#1");
}

proptest! {
    #[test]
    fn compilation_is_deterministic(id in "[a-zA-Z0-9@.-]{1,24}") {
        let template = KeyTemplate::parse("USER#{{id}}");
        let values = attribute_values([("id", id.as_str())]);

        let first = template.compile(&values).unwrap();
        let second = template.compile(&values).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_values_yield_distinct_keys(
        a in "[a-z0-9]{1,16}",
        b in "[a-z0-9]{1,16}",
    ) {
        prop_assume!(a != b);

        let template = KeyTemplate::parse("USER#{{id}}");
        let left = template.compile(&attribute_values([("id", a.as_str())])).unwrap();
        let right = template.compile(&attribute_values([("id", b.as_str())])).unwrap();

        prop_assert_ne!(left, right);
    }
}
