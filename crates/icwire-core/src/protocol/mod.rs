//! Wire formats.
//!
//! - `wire`: JSON shape of a message, payload replaced by its descriptor.
//! - `frame`: binary frame with a fixed header around the JSON body.
//!
//! Decoding is panic-free: malformed input is reported as `IcWireError`.

pub mod frame;
pub mod wire;
