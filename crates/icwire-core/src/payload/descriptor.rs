//! Serialization envelope for structured payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::payload::FieldMapping;

/// Type-erased stand-in for a live payload.
///
/// Every key of `values` is a key of `field_mapping`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadDescriptor {
    /// Logical record type name (the schema title).
    pub class_name: String,
    /// Field name -> declared kind, in schema order.
    pub field_mapping: FieldMapping,
    /// Field name -> plain value.
    #[serde(default)]
    pub values: Map<String, Value>,
}
