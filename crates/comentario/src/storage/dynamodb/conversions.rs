//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting comment records into DynamoDB items.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use comentario_core::comment::{CommentRecord, TENANT_ID_FIELD, TEXT_FIELD};
use serde_json::Value;

/// Partition key attribute.
pub const PARTITION_KEY: &str = TENANT_ID_FIELD;
/// Sort key attribute.
pub const SORT_KEY: &str = "uuid";
/// Attribute holding the comment content map.
pub const DETAIL_ATTRIBUTE: &str = "detalle";

/// Convert a CommentRecord to a DynamoDB item.
pub fn record_to_item(record: &CommentRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        PARTITION_KEY.to_string(),
        json_to_attribute(&record.tenant_id),
    );
    item.insert(SORT_KEY.to_string(), AttributeValue::S(record.id.to_string()));

    // Data
    let detail = HashMap::from([(
        TEXT_FIELD.to_string(),
        json_to_attribute(&record.detail.text),
    )]);
    item.insert(DETAIL_ATTRIBUTE.to_string(), AttributeValue::M(detail));

    item
}

/// Convert a submitted JSON value to the matching DynamoDB attribute type.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}
