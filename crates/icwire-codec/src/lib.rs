//! icwire codec library entry.
//!
//! Wires config, the type registry, and the core extract/rebuild pair into a
//! [`Codec`]. The free functions [`serialize`] and [`deserialize`] use a
//! process default codec backed by [`TypeRegistry::global`].

pub mod codec;
pub mod config;

use bytes::Bytes;
use once_cell::sync::Lazy;

use icwire_core::error::Result;
use icwire_core::registry::TypeRegistry;
use icwire_core::Message;

pub use codec::Codec;
pub use config::CodecConfig;

static DEFAULT_CODEC: Lazy<Codec> =
    Lazy::new(|| Codec::with_registry(CodecConfig::default(), TypeRegistry::global()));

/// Process default codec.
pub fn default_codec() -> &'static Codec {
    &DEFAULT_CODEC
}

/// Encode `message` with the process default codec.
pub fn serialize(message: &Message) -> Result<Bytes> {
    DEFAULT_CODEC.serialize(message)
}

/// Decode bytes produced by [`serialize`].
pub fn deserialize(bytes: &[u8]) -> Result<Message> {
    DEFAULT_CODEC.deserialize(bytes)
}
