//! Message codec: extract -> frame on the way out, frame -> rebuild on the
//! way in.

use std::sync::Arc;

use bytes::Bytes;

use icwire_core::error::{IcWireError, Result};
use icwire_core::payload::{extract, rebuild};
use icwire_core::protocol::frame::{decode_frame, encode_frame};
use icwire_core::registry::TypeRegistry;
use icwire_core::Message;

use crate::config::CodecConfig;

#[derive(Clone)]
pub struct Codec {
    inner: Arc<CodecInner>,
}

struct CodecInner {
    cfg: CodecConfig,
    registry: Arc<TypeRegistry>,
}

impl Codec {
    /// Codec with its own registry, built from `cfg.registry`.
    pub fn new(cfg: CodecConfig) -> Self {
        let registry = Arc::new(TypeRegistry::new(cfg.registry.on_conflict));
        Self::with_registry(cfg, registry)
    }

    /// Codec sharing an existing registry (e.g. [`TypeRegistry::global`]).
    /// The registry keeps its own conflict policy.
    pub fn with_registry(cfg: CodecConfig, registry: Arc<TypeRegistry>) -> Self {
        if registry.policy() != cfg.registry.on_conflict {
            tracing::warn!(
                configured = ?cfg.registry.on_conflict,
                effective = ?registry.policy(),
                "shared registry overrides configured conflict policy"
            );
        }
        Self {
            inner: Arc::new(CodecInner { cfg, registry }),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.inner.registry
    }

    /// Encode a message. The caller's message is left untouched.
    pub fn serialize(&self, message: &Message) -> Result<Bytes> {
        let wire = extract(message)?;
        encode_frame(&wire)
    }

    /// Decode a message, rebuilding its payload if one was sent.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Message> {
        let cfg = &self.inner.cfg;
        let max = cfg.codec.max_frame_bytes;
        if bytes.len() > max {
            return Err(IcWireError::Decode(format!("frame exceeds {max} bytes")));
        }
        let wire = decode_frame(Bytes::copy_from_slice(bytes), max)?;
        rebuild(wire, self.inner.registry.as_ref(), cfg.registry.unknown_values)
    }
}
