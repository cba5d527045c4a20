use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::store::Document;

/// Represents a DynamoDB item with various attribute types.
///
/// In DynamoDB, an item is a collection of attributes, each with a name and a value.
/// The router itself works with JSON documents; `Item` is the boundary type that
/// turns a document into the attribute map the SDK expects and back again.
///
/// # Numbers
///
/// DynamoDB carries numbers as decimal text (`N`). Documents are parsed with
/// `serde_json`'s arbitrary precision support, so a number is written out with
/// exactly the digits the caller sent and read back the same way. Nothing
/// passes through `f64`.
///
/// # Example
///
/// ```
/// let document = serde_json::from_str(r#"{"username": "johndoe", "rate": 19.90}"#)?;
/// let item = Item::from_document(document);
/// assert_eq!(item.attributes["rate"], AttributeValue::N("19.90".to_string()));
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) attributes: HashMap<String, AttributeValue>,
}

impl Item {
    /// Builds an item from a JSON document, one attribute per top-level field.
    pub fn from_document(document: Document) -> Self {
        Self {
            attributes: document
                .into_iter()
                .map(|(name, value)| (name, to_attribute(value)))
                .collect(),
        }
    }

    /// Converts the item back into a JSON document.
    pub fn into_document(self) -> Document {
        self.attributes
            .into_iter()
            .map(|(name, value)| (name, from_attribute(value)))
            .collect()
    }
}

impl From<HashMap<String, AttributeValue>> for Item {
    fn from(attributes: HashMap<String, AttributeValue>) -> Self {
        Self { attributes }
    }
}

/// Maps a JSON value onto the matching DynamoDB attribute type.
pub fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(to_attribute).collect())
        }
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(name, value)| (name, to_attribute(value)))
                .collect(),
        ),
    }
}

/// Maps a DynamoDB attribute back to JSON.
///
/// Sets become arrays and binary values become base64 strings.
pub fn from_attribute(attribute: AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number(n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.into_iter().map(from_attribute).collect()),
        AttributeValue::M(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name, from_attribute(value)))
                .collect(),
        ),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(values.into_iter().map(number).collect()),
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.into_inner())),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .into_iter()
                .map(|blob| Value::String(STANDARD.encode(blob.into_inner())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

// DynamoDB only hands back valid decimals, but keep the text rather than drop it.
fn number(text: String) -> Value {
    match Number::from_str(&text) {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}
