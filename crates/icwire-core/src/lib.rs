//! icwire core: message model, runtime-typed payload records, and the
//! extract/rebuild pair that carries them across a byte boundary.
//!
//! A message may hold a structured payload whose type only exists at runtime
//! (it was defined from a schema by an earlier pipeline step). This crate
//! erases such payloads into a [`payload::PayloadDescriptor`] before
//! encoding, and manufactures an equivalent record type on the way back in
//! through a [`payload::TypeFactory`] such as [`registry::TypeRegistry`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed schemas, values, and frames surface as `IcWireError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod message;
pub mod payload;
pub mod protocol;
pub mod registry;
pub mod schema;

/// Shared result type.
pub use error::{IcWireError, Result};
pub use message::Message;
