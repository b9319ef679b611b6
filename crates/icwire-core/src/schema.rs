//! Schema document -> field mapping.
//!
//! Only the first level of `properties` is read. Accepted property shapes:
//!
//! ```text
//! {"type": "string"}                               -> STRING
//! {"type": "array", "items": {"type": "string"}}   -> LIST_OF_STRING
//! {"type": "array", "items": {"type": "array"}}    -> LIST_OF_STRING_PAIR
//! ```
//!
//! Any other declared type is dropped from the mapping. That is a known
//! limitation, not an error: the payload still serializes, minus those fields.

use serde_json::Value;

use crate::error::{IcWireError, Result};
use crate::payload::{FieldKind, FieldMapping, FieldSpec};

/// Derive the reconstructable field mapping from a schema document.
pub fn schema_to_mapping(schema: &Value) -> Result<FieldMapping> {
    let properties = schema
        .as_object()
        .ok_or_else(|| IcWireError::Schema("schema document must be an object".into()))?
        .get("properties")
        .ok_or_else(|| IcWireError::Schema("schema document has no `properties`".into()))?
        .as_object()
        .ok_or_else(|| IcWireError::Schema("`properties` must be an object".into()))?;

    let mut mapping = FieldMapping::with_capacity(properties.len());
    for (field, property) in properties {
        match classify(field, property)? {
            Some(kind) => {
                mapping.insert(field.clone(), FieldSpec::required(kind));
            }
            None => {
                tracing::debug!(%field, "dropping property with unsupported type");
            }
        }
    }
    Ok(mapping)
}

/// The schema `title`, used as the record class name.
pub fn schema_title(schema: &Value) -> Result<String> {
    match schema.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        Some(_) => Err(IcWireError::Schema("schema `title` must not be empty".into())),
        None => Err(IcWireError::Schema("schema document has no string `title`".into())),
    }
}

fn classify(field: &str, property: &Value) -> Result<Option<FieldKind>> {
    let ty = declared_type(property)
        .ok_or_else(|| IcWireError::Schema(format!("property `{field}` has no string `type`")))?;

    match ty {
        "string" => Ok(Some(FieldKind::String)),
        "array" => {
            let item_ty = property
                .get("items")
                .and_then(declared_type)
                .ok_or_else(|| {
                    IcWireError::Schema(format!("array property `{field}` has no `items.type`"))
                })?;
            match item_ty {
                "string" => Ok(Some(FieldKind::ListOfString)),
                // only pairs of strings are modelled for nested arrays
                "array" => Ok(Some(FieldKind::ListOfStringPair)),
                _ => Ok(None),
            }
        }
        _ => Ok(None),
    }
}

fn declared_type(value: &Value) -> Option<&str> {
    value.as_object()?.get("type")?.as_str()
}
