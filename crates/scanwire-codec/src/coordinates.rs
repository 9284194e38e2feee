//! Nested Protocol Buffers layout with one message per point.
//!
//! Compatible with the `Coordinates` schema:
//!
//! ```text
//! message Coordinate  { repeated double values = 1; }
//! message Coordinates {
//!   repeated Coordinate unit       = 1;
//!   string              laser_type = 2;
//! }
//! ```
//!
//! Values are protobuf doubles and always little-endian on the wire; the
//! row codec's byte order does not apply.

use bytes::Bytes;
use prost::Message;
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::point::{Point, Profile};
use crate::row::ROW_ARITY;

/// One point as a repeated value list.
#[derive(Clone, PartialEq, Message)]
pub struct Coordinate {
    #[prost(double, repeated, tag = "1")]
    pub values: Vec<f64>,
}

/// A labelled list of per-point messages.
#[derive(Clone, PartialEq, Message)]
pub struct Coordinates {
    #[prost(message, repeated, tag = "1")]
    pub unit: Vec<Coordinate>,
    #[prost(string, tag = "2")]
    pub laser_type: String,
}

impl From<&Profile> for Coordinates {
    fn from(profile: &Profile) -> Self {
        Self {
            unit: profile
                .points
                .iter()
                .map(|p| Coordinate {
                    values: vec![p.x, p.y],
                })
                .collect(),
            laser_type: profile.label.clone(),
        }
    }
}

impl TryFrom<Coordinates> for Profile {
    type Error = CodecError;

    /// Every unit must hold exactly [`ROW_ARITY`] values.
    fn try_from(message: Coordinates) -> Result<Self> {
        let points = message
            .unit
            .iter()
            .enumerate()
            .map(|(row, unit)| match unit.values.as_slice() {
                &[x, y] => Ok(Point::new(x, y)),
                other => Err(CodecError::Shape {
                    row,
                    found: other.len(),
                    expected: ROW_ARITY,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Profile {
            label: message.laser_type,
            points,
        })
    }
}

/// Encode a profile as serialized `Coordinates` bytes.
pub fn encode_coordinates(profile: &Profile) -> Bytes {
    Bytes::from(Coordinates::from(profile).encode_to_vec())
}

/// Decode serialized `Coordinates` bytes into a profile.
pub fn decode_coordinates(message: &[u8]) -> Result<Profile> {
    let profile = Profile::try_from(Coordinates::decode(message)?)?;
    trace!(label = %profile.label, points = profile.len(), "decoded coordinates");
    Ok(profile)
}
