//! Structured payloads and their serialization envelope.
//!
//! - `record`: runtime record types and validated instances.
//! - `descriptor`: the type-erased `{class_name, field_mapping, values}` triple.
//! - `extract`: live payload -> descriptor (never mutates the caller's message).
//! - `rebuild`: descriptor -> live payload through a [`TypeFactory`].

pub mod descriptor;
pub mod extract;
pub mod rebuild;
pub mod record;

use serde_json::{Map, Value};

pub use descriptor::PayloadDescriptor;
pub use extract::{describe, extract};
pub use rebuild::{adopt, rebuild, restore, TypeFactory};
pub use record::{
    FieldKind, FieldMapping, FieldSpec, FieldValue, Record, RecordType, UnknownValues,
};

/// A payload whose shape is described at runtime by a schema document.
pub trait StructuredPayload {
    /// Schema document: `title`, `properties`, `required`.
    fn schema(&self) -> Value;
    /// Current field values as plain JSON.
    fn values(&self) -> Map<String, Value>;
}
