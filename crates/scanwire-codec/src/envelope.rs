//! Labelled envelope around an opaque row buffer.
//!
//! The envelope is a Protocol Buffers message compatible with the
//! `CoordinatesBytes` schema:
//!
//! ```text
//! message CoordinatesBytes {
//!   bytes  coordinates_data = 1;
//!   string laser_type       = 2;
//! }
//! ```

use bytes::Bytes;
use prost::Message;

use crate::error::{CodecError, Result};
use crate::point::{Point, Profile};
use crate::row::RowCodec;

/// A row buffer tagged with the laser type it was scanned by.
#[derive(Clone, PartialEq, Message)]
pub struct Envelope {
    /// Encoded rows. Never interpreted at this layer.
    #[prost(bytes = "bytes", tag = "1")]
    pub payload: Bytes,
    /// Semantic category of the payload, e.g. "Flange" or "Tread".
    #[prost(string, tag = "2")]
    pub label: String,
}

impl Envelope {
    pub fn new(payload: impl Into<Bytes>, label: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            label: label.into(),
        }
    }

    /// Serialize into one self-contained message.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.encode_to_vec())
    }

    /// Decode the payload rows.
    ///
    /// A misaligned payload is reported as [`CodecError::CorruptPayload`] so
    /// callers can tell it apart from a broken envelope.
    pub fn points(&self, codec: &RowCodec) -> Result<Vec<Point>> {
        codec.decode(&self.payload).map_err(|err| match err {
            CodecError::Alignment { len, stride } => CodecError::CorruptPayload { len, stride },
            other => other,
        })
    }
}

/// Wrap a row buffer and its label into serialized envelope bytes.
pub fn wrap(payload: impl Into<Bytes>, label: &str) -> Bytes {
    Envelope::new(payload, label).to_bytes()
}

/// Parse serialized envelope bytes.
pub fn unwrap(message: &[u8]) -> Result<Envelope> {
    Ok(Envelope::decode(message)?)
}

/// Parse serialized envelope bytes and decode the rows they carry.
pub fn unwrap_points(message: &[u8], codec: &RowCodec) -> Result<(Vec<Point>, String)> {
    let envelope = unwrap(message)?;
    let points = envelope.points(codec)?;
    Ok((points, envelope.label))
}

/// Encode a profile as serialized envelope bytes.
pub fn encode_profile(profile: &Profile, codec: &RowCodec) -> Bytes {
    wrap(codec.encode_points(&profile.points), &profile.label)
}

/// Decode serialized envelope bytes into a profile.
pub fn decode_profile(message: &[u8], codec: &RowCodec) -> Result<Profile> {
    let (points, label) = unwrap_points(message, codec)?;
    tracing::trace!(label = %label, points = points.len(), "decoded envelope");
    Ok(Profile { label, points })
}
