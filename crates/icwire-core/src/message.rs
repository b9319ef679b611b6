//! Message: the unit handed between pipeline steps.

use std::collections::BTreeSet;

use crate::payload::Record;

/// Pipeline message, optionally carrying a structured payload.
///
/// `Clone` is a full snapshot: the payload's values are owned, only the
/// immutable record type is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
    /// Name of the step that produced this message.
    pub cause_by: String,
    pub sent_from: String,
    pub send_to: BTreeSet<String>,
    pub payload: Option<Record>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            cause_by: String::new(),
            sent_from: String::new(),
            send_to: BTreeSet::new(),
            payload: None,
        }
    }

    pub fn with_cause_by(mut self, cause_by: impl Into<String>) -> Self {
        self.cause_by = cause_by.into();
        self
    }

    pub fn with_sent_from(mut self, sent_from: impl Into<String>) -> Self {
        self.sent_from = sent_from.into();
        self
    }

    pub fn with_send_to<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_to = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payload(mut self, payload: Record) -> Self {
        self.payload = Some(payload);
        self
    }
}
