//! [`PayloadDescriptor`] -> live payload.

use std::sync::Arc;

use crate::error::Result;
use crate::message::Message;
use crate::payload::extract::describe;
use crate::payload::{
    FieldMapping, PayloadDescriptor, Record, RecordType, StructuredPayload, UnknownValues,
};
use crate::protocol::wire::WireMessage;

/// Defines record types at runtime from a name and a field mapping.
pub trait TypeFactory: Send + Sync {
    fn define(&self, class_name: &str, mapping: &FieldMapping) -> Result<Arc<RecordType>>;
}

/// Manufacture the descriptor's record type and instantiate it with its values.
pub fn restore<F: TypeFactory + ?Sized>(
    descriptor: &PayloadDescriptor,
    factory: &F,
    unknown: UnknownValues,
) -> Result<Record> {
    let ty = factory.define(&descriptor.class_name, &descriptor.field_mapping)?;
    ty.instantiate(&descriptor.values, unknown)
}

/// Turn a decoded wire message back into a message with a live payload.
pub fn rebuild<F: TypeFactory + ?Sized>(
    wire: WireMessage,
    factory: &F,
    unknown: UnknownValues,
) -> Result<Message> {
    let WireMessage {
        role,
        content,
        cause_by,
        sent_from,
        send_to,
        payload,
    } = wire;

    let payload = match payload {
        Some(descriptor) => Some(restore(&descriptor, factory, unknown)?),
        None => None,
    };

    Ok(Message {
        role,
        content,
        cause_by,
        sent_from,
        send_to,
        payload,
    })
}

/// Convert any structured payload into a [`Record`] defined through `factory`.
///
/// Fields with unsupported types are dropped, exactly as on the wire.
pub fn adopt<P, F>(payload: &P, factory: &F) -> Result<Record>
where
    P: StructuredPayload + ?Sized,
    F: TypeFactory + ?Sized,
{
    let descriptor = describe(payload)?;
    restore(&descriptor, factory, UnknownValues::Reject)
}
