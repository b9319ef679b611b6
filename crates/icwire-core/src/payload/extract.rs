//! Live payload -> [`PayloadDescriptor`].

use serde_json::{Map, Value};

use crate::error::Result;
use crate::message::Message;
use crate::payload::{PayloadDescriptor, StructuredPayload};
use crate::protocol::wire::WireMessage;
use crate::schema::{schema_title, schema_to_mapping};

/// Describe a live payload as a serialization-safe descriptor.
///
/// Values for fields that did not survive schema mapping are left out, so the
/// descriptor's `values` never name a field missing from `field_mapping`.
pub fn describe<P: StructuredPayload + ?Sized>(payload: &P) -> Result<PayloadDescriptor> {
    let schema = payload.schema();
    let class_name = schema_title(&schema)?;
    let field_mapping = schema_to_mapping(&schema)?;

    let values: Map<String, Value> = payload
        .values()
        .into_iter()
        .filter(|(field, _)| {
            let keep = field_mapping.contains_key(field);
            if !keep {
                tracing::debug!(class = %class_name, %field, "dropping value without mapped field");
            }
            keep
        })
        .collect();

    Ok(PayloadDescriptor {
        class_name,
        field_mapping,
        values,
    })
}

/// Turn a message into its encodable form without touching the original.
pub fn extract(message: &Message) -> Result<WireMessage> {
    let mut snapshot = message.clone();
    let payload = match snapshot.payload.take() {
        Some(record) => Some(describe(&record)?),
        None => None,
    };

    Ok(WireMessage {
        role: snapshot.role,
        content: snapshot.content,
        cause_by: snapshot.cause_by,
        sent_from: snapshot.sent_from,
        send_to: snapshot.send_to,
        payload,
    })
}
