use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: magic (2) + length (4) + flags (2) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Magic bytes: "SW" (0x53 0x57).
pub const MAGIC: [u8; 2] = [0x53, 0x57];

/// Flag bit: another frame of the same message follows.
pub const FLAG_MORE: u16 = 0x0001;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Default maximum number of parts in one message (the raw strategy's three).
pub const DEFAULT_MAX_MESSAGE_PARTS: usize = 3;

/// One frame on the wire; one part of a (possibly multi-part) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// True when more frames of the same message follow.
    pub more: bool,
    /// The frame payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create the final (or only) frame of a message.
    pub fn last(payload: impl Into<Bytes>) -> Self {
        Self {
            more: false,
            payload: payload.into(),
        }
    }

    /// Create a non-final frame of a multi-part message.
    pub fn part(payload: impl Into<Bytes>) -> Self {
        Self {
            more: true,
            payload: payload.into(),
        }
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬───────────┬──────────┬─────────────────┐
/// │ Magic (2B)   │ Length    │ Flags    │ Payload         │
/// │ 0x53 0x57    │ (4B LE)   │ (2B LE)  │ (Length bytes)  │
/// │ "SW"         │           │ bit0=MORE│                 │
/// └──────────────┴───────────┴──────────┴─────────────────┘
/// ```
pub fn encode_frame(more: bool, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: u32::MAX as usize,
        });
    }
    let flags = if more { FLAG_MORE } else { 0 };
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&MAGIC);
    dst.put_u32_le(payload.len() as u32);
    dst.put_u16_le(flags);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    if src[0..2] != MAGIC {
        return Err(FrameError::InvalidMagic);
    }

    let mut header = &src[2..HEADER_SIZE];
    let payload_len = header.get_u32_le() as usize;
    let flags = header.get_u16_le();

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Frame {
        more: flags & FLAG_MORE != 0,
        payload,
    }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Maximum number of frames in one message. Default: 3.
    pub max_message_parts: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_message_parts: DEFAULT_MAX_MESSAGE_PARTS,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
