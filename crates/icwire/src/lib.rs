//! Top-level facade crate for icwire.
//!
//! Re-exports the core model and the codec so users can depend on a single crate.

pub mod core {
    pub use icwire_core::*;
}

pub mod codec {
    pub use icwire_codec::*;
}

pub use icwire_codec::{deserialize, serialize, Codec, CodecConfig};
pub use icwire_core::{IcWireError, Message, Result};
