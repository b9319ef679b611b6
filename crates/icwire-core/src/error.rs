//! Shared error type across icwire crates.

use thiserror::Error;

/// Stable error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed or unsupported schema document.
    Schema,
    /// Values do not conform to the declared field mapping.
    Validation,
    /// Runtime type definition refused.
    Reconstruction,
    /// Bytes are not a valid encoded message.
    Decode,
    /// Message could not be encoded.
    Encode,
    /// Unsupported frame or config version.
    UnsupportedVersion,
    /// Configuration unreadable or invalid.
    Config,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Schema => "SCHEMA_ERROR",
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Reconstruction => "RECONSTRUCTION_ERROR",
            ErrorCode::Decode => "DECODE_ERROR",
            ErrorCode::Encode => "ENCODE_ERROR",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Config => "CONFIG_ERROR",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, IcWireError>;

/// Unified error type used by core and codec.
#[derive(Debug, Error)]
pub enum IcWireError {
    #[error("schema error: {0}")]
    Schema(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("reconstruction error: {0}")]
    Reconstruction(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("config error: {0}")]
    Config(String),
}

impl IcWireError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            IcWireError::Schema(_) => ErrorCode::Schema,
            IcWireError::Validation(_) => ErrorCode::Validation,
            IcWireError::Reconstruction(_) => ErrorCode::Reconstruction,
            IcWireError::Decode(_) => ErrorCode::Decode,
            IcWireError::Encode(_) => ErrorCode::Encode,
            IcWireError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            IcWireError::Config(_) => ErrorCode::Config,
        }
    }
}
