//! Wire message (JSON body of a frame).
//!
//! Same fixed fields as [`crate::Message`], with the live payload replaced by
//! its descriptor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::payload::PayloadDescriptor;

/// Encodable form of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub cause_by: String,
    #[serde(default)]
    pub sent_from: String,
    #[serde(default)]
    pub send_to: BTreeSet<String>,
    /// Payload descriptor, absent when the message has no payload.
    #[serde(default)]
    pub payload: Option<PayloadDescriptor>,
}
