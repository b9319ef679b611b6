//! Open records: runtime-defined record types and their instances.
//!
//! A [`RecordType`] is a named, ordered list of typed fields. A [`Record`]
//! is an instance validated against its type at construction, so a record
//! never holds a value whose shape disagrees with its declared field kind.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::error::{IcWireError, Result};
use crate::payload::StructuredPayload;

/// Closed set of reconstructable field shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    /// Plain text.
    String,
    /// Ordered sequence of text.
    ListOfString,
    /// Ordered sequence of (text, text) pairs.
    ListOfStringPair,
}

impl FieldKind {
    /// Tag as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::ListOfString => "LIST_OF_STRING",
            FieldKind::ListOfStringPair => "LIST_OF_STRING_PAIR",
        }
    }

    /// JSON schema fragment for a property of this kind.
    fn property_schema(self, title: &str) -> Value {
        match self {
            FieldKind::String => json!({ "title": title, "type": "string" }),
            FieldKind::ListOfString => json!({
                "title": title,
                "type": "array",
                "items": { "type": "string" },
            }),
            FieldKind::ListOfStringPair => json!({
                "title": title,
                "type": "array",
                "items": {
                    "type": "array",
                    "minItems": 2,
                    "maxItems": 2,
                    "items": [{ "type": "string" }, { "type": "string" }],
                },
            }),
        }
    }
}

/// Declared type of one field. Every field is required.
///
/// On the wire this is `{"kind": ..., "required": true}`; a spec marked
/// `required: false` is refused when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Required field of the given kind.
    pub fn required(kind: FieldKind) -> Self {
        Self { kind }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireFieldSpec {
    kind: FieldKind,
    #[serde(default = "default_required")]
    required: bool,
}

fn default_required() -> bool {
    true
}

impl Serialize for FieldSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireFieldSpec {
            kind: self.kind,
            required: true,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = WireFieldSpec::deserialize(deserializer)?;
        if !raw.required {
            return Err(de::Error::custom(format!(
                "{} field must be required",
                raw.kind.as_str()
            )));
        }
        Ok(Self { kind: raw.kind })
    }
}

/// Ordered mapping from field name to its declared type.
pub type FieldMapping = IndexMap<String, FieldSpec>;

/// A field value, already checked against its [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    TextList(Vec<String>),
    PairList(Vec<(String, String)>),
}

impl FieldValue {
    /// Kind this value satisfies.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::String,
            FieldValue::TextList(_) => FieldKind::ListOfString,
            FieldValue::PairList(_) => FieldKind::ListOfStringPair,
        }
    }

    /// Plain JSON form (`string`, `[string]`, `[[string, string]]`).
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::TextList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            FieldValue::PairList(pairs) => {
                Value::Array(pairs.iter().map(|(a, b)| json!([a, b])).collect())
            }
        }
    }

    /// Parse a plain JSON value as `kind`. The error is a short reason.
    pub fn from_json(kind: FieldKind, value: &Value) -> std::result::Result<Self, String> {
        match kind {
            FieldKind::String => match value {
                Value::String(s) => Ok(FieldValue::Text(s.clone())),
                other => Err(format!("expected string, got {}", json_type(other))),
            },
            FieldKind::ListOfString => {
                let items = as_array(value)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        other => {
                            let got = json_type(other);
                            return Err(format!("item {i}: expected string, got {got}"));
                        }
                    }
                }
                Ok(FieldValue::TextList(out))
            }
            FieldKind::ListOfStringPair => {
                let items = as_array(value)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item.as_array().map(Vec::as_slice) {
                        Some([Value::String(a), Value::String(b)]) => {
                            out.push((a.clone(), b.clone()))
                        }
                        _ => return Err(format!("item {i}: expected a pair of strings")),
                    }
                }
                Ok(FieldValue::PairList(out))
            }
        }
    }
}

fn as_array(value: &Value) -> std::result::Result<&Vec<Value>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("expected array, got {}", json_type(value)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// How to treat values whose name is not in the field mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownValues {
    #[default]
    Reject,
    Ignore,
}

/// Runtime-defined record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    name: String,
    fields: FieldMapping,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: FieldMapping) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &FieldMapping {
        &self.fields
    }

    /// Build a record of this type from plain values.
    ///
    /// Every declared field must be present and every value must match its
    /// declared kind.
    pub fn instantiate(
        self: &Arc<Self>,
        values: &Map<String, Value>,
        unknown: UnknownValues,
    ) -> Result<Record> {
        for key in values.keys() {
            if self.fields.contains_key(key) {
                continue;
            }
            match unknown {
                UnknownValues::Reject => {
                    return Err(IcWireError::Validation(format!(
                        "{}: unknown field `{key}`",
                        self.name
                    )))
                }
                UnknownValues::Ignore => {
                    tracing::debug!(class = %self.name, field = %key, "ignoring unknown value");
                }
            }
        }

        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (name, spec) in &self.fields {
            let value = values.get(name).ok_or_else(|| {
                IcWireError::Validation(format!("{}.{name}: field required", self.name))
            })?;
            let parsed = FieldValue::from_json(spec.kind, value).map_err(|reason| {
                IcWireError::Validation(format!("{}.{name}: {reason}", self.name))
            })?;
            fields.insert(name.clone(), parsed);
        }

        Ok(Record {
            ty: Arc::clone(self),
            fields,
        })
    }
}

/// Live structured payload: a record type plus validated field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    ty: Arc<RecordType>,
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn class_name(&self) -> &str {
        self.ty.name()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Replace one field's value; the value must match the declared kind.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<()> {
        let spec = self.ty.fields().get(field).ok_or_else(|| {
            IcWireError::Validation(format!("{}: unknown field `{field}`", self.ty.name()))
        })?;
        if spec.kind != value.kind() {
            return Err(IcWireError::Validation(format!(
                "{}.{field}: expected {}, got {}",
                self.ty.name(),
                spec.kind.as_str(),
                value.kind().as_str()
            )));
        }
        // every field is set at construction, so this replaces in place
        self.fields.insert(field.to_string(), value);
        Ok(())
    }
}

impl StructuredPayload for Record {
    fn schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, spec) in self.ty.fields() {
            properties.insert(name.clone(), spec.kind.property_schema(name));
            required.push(Value::String(name.clone()));
        }
        json!({
            "title": self.ty.name(),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn values(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}
