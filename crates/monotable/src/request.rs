use crate::value::Item;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// GetRequest
///
/// Field names across this module are the store's wire-protocol names, not an
/// implementation detail; serde renames must stay byte-exact.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRequest {
    pub table_name: String,
    pub key: Item,
}

///
/// PutRequest
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    pub table_name: String,
    pub item: Item,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<BTreeMap<String, String>>,
}

///
/// UpdateRequest
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRequest {
    pub table_name: String,
    pub key: Item,
    pub update_expression: String,
    pub expression_attribute_names: BTreeMap<String, String>,
    pub expression_attribute_values: Item,

    /// Present on standalone updates only; transactional updates carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
}

///
/// DeleteRequest
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequest {
    pub table_name: String,
    pub key: Item,
}

///
/// QueryRequest
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    pub table_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    pub key_condition_expression: String,
    pub expression_attribute_names: BTreeMap<String, String>,
    pub expression_attribute_values: Item,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,
}

///
/// ReturnValues
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ReturnValues {
    #[serde(rename = "ALL_NEW")]
    AllNew,
    #[serde(rename = "ALL_OLD")]
    AllOld,
    #[serde(rename = "NONE")]
    None,
}

///
/// TransactWriteItem
///
/// One independently-addressed operation inside a transactional batch.
/// External serde tagging yields the wire form `{"Put": {...}}`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TransactWriteItem {
    Put(PutRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

///
/// TransactWriteBatch
///
/// Ordered sequence of write operations submitted to the store as a single
/// all-or-nothing unit.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransactWriteBatch {
    pub items: Vec<TransactWriteItem>,
}

impl TransactWriteBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn push(&mut self, item: TransactWriteItem) {
        self.items.push(item);
    }
}

impl From<Vec<TransactWriteItem>> for TransactWriteBatch {
    fn from(items: Vec<TransactWriteItem>) -> Self {
        Self { items }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::attribute_values;

    #[test]
    fn get_request_serializes_with_wire_field_names() {
        let request = GetRequest {
            table_name: "test-table".to_string(),
            key: attribute_values([("PK", "USER#1"), ("SK", "USER#1")]),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "TableName": "test-table",
                "Key": { "PK": "USER#1", "SK": "USER#1" }
            })
        );
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let request = PutRequest {
            table_name: "test-table".to_string(),
            item: attribute_values([("PK", "USER#1")]),
            condition_expression: None,
            expression_attribute_names: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json.as_object().unwrap().keys().collect::<Vec<_>>(),
            ["Item", "TableName"]
        );
    }

    #[test]
    fn transact_items_use_external_tagging() {
        let batch = TransactWriteBatch::from(vec![TransactWriteItem::Delete(DeleteRequest {
            table_name: "test-table".to_string(),
            key: attribute_values([("PK", "USER#1")]),
        })]);

        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            serde_json::json!([
                { "Delete": { "TableName": "test-table", "Key": { "PK": "USER#1" } } }
            ])
        );
    }

    #[test]
    fn return_values_wire_form() {
        assert_eq!(
            serde_json::to_string(&ReturnValues::AllNew).unwrap(),
            "\"ALL_NEW\""
        );
    }
}
