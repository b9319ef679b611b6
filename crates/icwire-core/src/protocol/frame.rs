//! Binary frame encoding (panic-free).
//!
//! Layout: `v: u8`, `flags: u8`, `body_len: u32 LE`, then `body_len` bytes of
//! JSON ([`WireMessage`]). The format round-trips through this module only;
//! it is not meant for cross-version interchange.
//!
//! Parsing rules:
//! - Never index (`buf[0]`); always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{IcWireError, Result};
use crate::protocol::wire::WireMessage;

/// Current frame version.
pub const FRAME_VERSION: u8 = 1;

/// Flag: body carries a payload descriptor.
pub const FLAG_PAYLOAD_PRESENT: u8 = 0x01;

/// v + flags + body_len.
pub const HEADER_LEN: usize = 6;

/// Encode a wire message into a frame.
pub fn encode_frame(msg: &WireMessage) -> Result<Bytes> {
    let body = serde_json::to_vec(msg)
        .map_err(|e| IcWireError::Encode(format!("wire message json: {e}")))?;
    let body_len = u32::try_from(body.len())
        .map_err(|_| IcWireError::Encode(format!("body too large: {} bytes", body.len())))?;

    let flags = if msg.payload.is_some() {
        FLAG_PAYLOAD_PRESENT
    } else {
        0
    };

    let mut buf = BytesMut::with_capacity(HEADER_LEN + body.len());
    buf.put_u8(FRAME_VERSION);
    buf.put_u8(flags);
    buf.put_u32_le(body_len);
    buf.put_slice(&body);

    tracing::trace!(body_len, flags, "frame encoded");
    Ok(buf.freeze())
}

/// Decode a frame of at most `max_frame_bytes` bytes.
pub fn decode_frame(mut buf: Bytes, max_frame_bytes: usize) -> Result<WireMessage> {
    if buf.remaining() > max_frame_bytes {
        return Err(IcWireError::Decode(format!("frame exceeds {max_frame_bytes} bytes")));
    }
    if buf.remaining() < HEADER_LEN {
        return Err(IcWireError::Decode("frame too short".into()));
    }

    let v = buf.get_u8();
    if v != FRAME_VERSION {
        return Err(IcWireError::UnsupportedVersion(v));
    }

    let flags = buf.get_u8();
    if flags & !FLAG_PAYLOAD_PRESENT != 0 {
        return Err(IcWireError::Decode(format!("unknown flags: {flags:#04x}")));
    }

    let body_len = buf.get_u32_le() as usize;
    if buf.remaining() != body_len {
        return Err(IcWireError::Decode(format!(
            "body length mismatch: header={body_len} actual={}",
            buf.remaining()
        )));
    }

    let msg: WireMessage = serde_json::from_slice(&buf)
        .map_err(|e| IcWireError::Decode(format!("invalid wire message json: {e}")))?;

    let flagged = (flags & FLAG_PAYLOAD_PRESENT) != 0;
    if flagged != msg.payload.is_some() {
        return Err(IcWireError::Decode("payload flag disagrees with body".into()));
    }

    tracing::trace!(body_len, flags, "frame decoded");
    Ok(msg)
}
