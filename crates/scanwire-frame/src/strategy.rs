//! How a profile is laid out as the parts of one framed message.
//!
//! Three layouts are supported:
//!
//! ```text
//! StructuredEnvelope (1 part):
//!   [ envelope { payload: rows, label } ]
//!
//! RepeatedCoordinates (1 part):
//!   [ coordinates { unit: [ { values: [x, y] }, .. ], laser_type } ]
//!
//! RawMultiFrame (3 parts):
//!   [ i32 LE element count ] [ i32 LE row arity ] [ rows ]
//! ```
//!
//! The raw layout carries no label.

use bytes::Bytes;
use scanwire_codec::{coordinates, envelope, CodecError, Profile, RowCodec, ROW_ARITY, ROW_STRIDE, VALUE_SIZE};

use crate::error::{FrameError, Result};

const COUNT_SIZE: usize = std::mem::size_of::<i32>();

/// Framing strategy for profiles on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStrategy {
    /// Element count, row arity and a raw value blob as three parts.
    RawMultiFrame,
    /// One Protocol Buffers envelope holding the rows and the label.
    #[default]
    StructuredEnvelope,
    /// One Protocol Buffers message with a nested message per point.
    RepeatedCoordinates,
}

impl FrameStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RawMultiFrame => "raw",
            Self::StructuredEnvelope => "envelope",
            Self::RepeatedCoordinates => "repeated",
        }
    }

    /// Whether the strategy carries the profile label on the wire.
    pub fn carries_label(&self) -> bool {
        matches!(self, Self::StructuredEnvelope | Self::RepeatedCoordinates)
    }

    /// Number of parts in every message of this layout.
    pub fn part_count(&self) -> usize {
        match self {
            Self::RawMultiFrame => 3,
            Self::StructuredEnvelope | Self::RepeatedCoordinates => 1,
        }
    }

    /// Lay out a profile as message parts.
    pub fn encode(&self, profile: &Profile, codec: &RowCodec) -> Result<Vec<Bytes>> {
        match self {
            Self::StructuredEnvelope => Ok(vec![envelope::encode_profile(profile, codec)]),
            Self::RepeatedCoordinates => Ok(vec![coordinates::encode_coordinates(profile)]),
            Self::RawMultiFrame => {
                let elements = profile.len() * ROW_ARITY;
                let count = i32::try_from(elements).map_err(|_| {
                    FrameError::InvalidElementCount(format!(
                        "{elements} elements do not fit a 32-bit count"
                    ))
                })?;
                Ok(vec![
                    Bytes::copy_from_slice(&count.to_le_bytes()),
                    Bytes::copy_from_slice(&(ROW_ARITY as i32).to_le_bytes()),
                    codec.encode_points(&profile.points),
                ])
            }
        }
    }

    /// Rebuild a profile from the parts of one message.
    ///
    /// Nothing is returned unless every part validates.
    pub fn decode(&self, parts: &[Bytes], codec: &RowCodec) -> Result<Profile> {
        match self {
            Self::StructuredEnvelope => {
                let [message] = parts else {
                    return Err(FrameError::UnexpectedPartCount {
                        expected: self.part_count(),
                        found: parts.len(),
                    });
                };
                Ok(envelope::decode_profile(message, codec)?)
            }
            Self::RepeatedCoordinates => {
                let [message] = parts else {
                    return Err(FrameError::UnexpectedPartCount {
                        expected: self.part_count(),
                        found: parts.len(),
                    });
                };
                Ok(coordinates::decode_coordinates(message)?)
            }
            Self::RawMultiFrame => {
                let [count, arity, blob] = parts else {
                    return Err(FrameError::UnexpectedPartCount {
                        expected: self.part_count(),
                        found: parts.len(),
                    });
                };

                let declared = read_count(count, "element count")?;
                let arity = read_count(arity, "row arity")?;
                if arity != ROW_ARITY {
                    tracing::warn!(arity, expected = ROW_ARITY, "ignoring unexpected row arity frame");
                }
                if declared % ROW_ARITY != 0 {
                    return Err(CodecError::Alignment {
                        len: declared.saturating_mul(VALUE_SIZE),
                        stride: ROW_STRIDE,
                    }
                    .into());
                }
                if blob.len() != declared.saturating_mul(VALUE_SIZE) {
                    return Err(FrameError::ElementCountMismatch {
                        declared,
                        actual: blob.len() / VALUE_SIZE,
                    });
                }

                let points = codec.decode(blob)?;
                Ok(Profile {
                    label: String::new(),
                    points,
                })
            }
        }
    }
}

fn read_count(part: &[u8], what: &str) -> Result<usize> {
    let bytes: [u8; COUNT_SIZE] = part.try_into().map_err(|_| {
        FrameError::InvalidElementCount(format!(
            "{what} frame is {} bytes (expected {COUNT_SIZE})",
            part.len()
        ))
    })?;
    let value = i32::from_le_bytes(bytes);
    usize::try_from(value)
        .map_err(|_| FrameError::InvalidElementCount(format!("{what} is negative ({value})")))
}

impl std::str::FromStr for FrameStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "raw-multi-frame" => Ok(Self::RawMultiFrame),
            "envelope" | "structured-envelope" => Ok(Self::StructuredEnvelope),
            "repeated" | "repeated-coordinates" => Ok(Self::RepeatedCoordinates),
            other => Err(format!("unknown frame strategy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use scanwire_codec::Point;

    use super::*;

    fn flange() -> Profile {
        Profile::new("Flange", vec![Point::new(1.0, 2.0), Point::new(3.5, -4.25)])
    }

    #[test]
    fn envelope_roundtrip_keeps_label() {
        let codec = RowCodec::default();
        let parts = FrameStrategy::StructuredEnvelope
            .encode(&flange(), &codec)
            .unwrap();
        assert_eq!(parts.len(), 1);

        let decoded = FrameStrategy::StructuredEnvelope
            .decode(&parts, &codec)
            .unwrap();
        assert_eq!(decoded, flange());
    }

    #[test]
    fn repeated_roundtrip_keeps_label() {
        let codec = RowCodec::default();
        let parts = FrameStrategy::RepeatedCoordinates
            .encode(&flange(), &codec)
            .unwrap();
        assert_eq!(parts.len(), FrameStrategy::RepeatedCoordinates.part_count());

        let decoded = FrameStrategy::RepeatedCoordinates
            .decode(&parts, &codec)
            .unwrap();
        assert_eq!(decoded, flange());
    }

    #[test]
    fn repeated_ignores_row_byte_order() {
        let parts = FrameStrategy::RepeatedCoordinates
            .encode(&flange(), &RowCodec::new(scanwire_codec::ByteOrder::Big))
            .unwrap();
        let decoded = FrameStrategy::RepeatedCoordinates
            .decode(&parts, &RowCodec::default())
            .unwrap();
        assert_eq!(decoded.points, flange().points);
    }

    #[test]
    fn repeated_rejects_wrong_unit_arity() {
        use prost::Message;

        let message = coordinates::Coordinates {
            unit: vec![coordinates::Coordinate {
                values: vec![1.0, 2.0, 3.0],
            }],
            laser_type: "Flange".into(),
        };
        let parts = vec![Bytes::from(message.encode_to_vec())];

        let err = FrameStrategy::RepeatedCoordinates
            .decode(&parts, &RowCodec::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Codec(CodecError::Shape {
                row: 0,
                found: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn raw_layout() {
        let codec = RowCodec::default();
        let parts = FrameStrategy::RawMultiFrame.encode(&flange(), &codec).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].as_ref(), &4i32.to_le_bytes());
        assert_eq!(parts[1].as_ref(), &2i32.to_le_bytes());
        assert_eq!(parts[2].len(), 32);
        assert_eq!(&parts[2][8..16], &2.0f64.to_le_bytes());
    }

    #[test]
    fn raw_roundtrip_drops_label() {
        let codec = RowCodec::default();
        let parts = FrameStrategy::RawMultiFrame.encode(&flange(), &codec).unwrap();
        let decoded = FrameStrategy::RawMultiFrame.decode(&parts, &codec).unwrap();

        assert!(decoded.label.is_empty());
        assert_eq!(decoded.points, flange().points);
    }

    #[test]
    fn raw_empty_profile() {
        let codec = RowCodec::default();
        let parts = FrameStrategy::RawMultiFrame
            .encode(&Profile::default(), &codec)
            .unwrap();
        assert_eq!(parts[0].as_ref(), &0i32.to_le_bytes());
        assert!(parts[2].is_empty());

        let decoded = FrameStrategy::RawMultiFrame.decode(&parts, &codec).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn raw_arity_frame_is_informational() {
        let codec = RowCodec::default();
        let mut parts = FrameStrategy::RawMultiFrame.encode(&flange(), &codec).unwrap();
        parts[1] = Bytes::copy_from_slice(&7i32.to_le_bytes());

        let decoded = FrameStrategy::RawMultiFrame.decode(&parts, &codec).unwrap();
        assert_eq!(decoded.points, flange().points);
    }

    #[test]
    fn raw_count_mismatch() {
        let codec = RowCodec::default();
        let mut parts = FrameStrategy::RawMultiFrame.encode(&flange(), &codec).unwrap();
        parts[0] = Bytes::copy_from_slice(&6i32.to_le_bytes());

        let err = FrameStrategy::RawMultiFrame.decode(&parts, &codec).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ElementCountMismatch {
                declared: 6,
                actual: 4
            }
        ));
    }

    #[test]
    fn raw_odd_count_is_alignment_error() {
        let codec = RowCodec::default();
        let parts = vec![
            Bytes::copy_from_slice(&3i32.to_le_bytes()),
            Bytes::copy_from_slice(&2i32.to_le_bytes()),
            Bytes::from(vec![0u8; 24]),
        ];

        let err = FrameStrategy::RawMultiFrame.decode(&parts, &codec).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Codec(CodecError::Alignment { len: 24, stride: 16 })
        ));
    }

    #[test]
    fn raw_rejects_negative_and_short_counts() {
        let codec = RowCodec::default();
        let negative = vec![
            Bytes::copy_from_slice(&(-2i32).to_le_bytes()),
            Bytes::copy_from_slice(&2i32.to_le_bytes()),
            Bytes::new(),
        ];
        assert!(matches!(
            FrameStrategy::RawMultiFrame.decode(&negative, &codec),
            Err(FrameError::InvalidElementCount(_))
        ));

        let short = vec![
            Bytes::from_static(&[2, 0]),
            Bytes::copy_from_slice(&2i32.to_le_bytes()),
            Bytes::new(),
        ];
        assert!(matches!(
            FrameStrategy::RawMultiFrame.decode(&short, &codec),
            Err(FrameError::InvalidElementCount(_))
        ));
    }

    #[test]
    fn part_count_checked() {
        let codec = RowCodec::default();
        let one = vec![Bytes::new()];
        let two = vec![Bytes::new(), Bytes::new()];

        assert!(matches!(
            FrameStrategy::RawMultiFrame.decode(&one, &codec),
            Err(FrameError::UnexpectedPartCount {
                expected: 3,
                found: 1
            })
        ));
        assert!(matches!(
            FrameStrategy::StructuredEnvelope.decode(&two, &codec),
            Err(FrameError::UnexpectedPartCount {
                expected: 1,
                found: 2
            })
        ));
        assert!(matches!(
            FrameStrategy::RepeatedCoordinates.decode(&two, &codec),
            Err(FrameError::UnexpectedPartCount {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn envelope_corrupt_payload_surfaces_as_codec_error() {
        let codec = RowCodec::default();
        let parts = vec![envelope::wrap(Bytes::from(vec![0u8; 17]), "Tread")];

        let err = FrameStrategy::StructuredEnvelope
            .decode(&parts, &codec)
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Codec(CodecError::CorruptPayload { .. })
        ));
    }

    #[test]
    fn parses_names() {
        assert_eq!("raw".parse::<FrameStrategy>(), Ok(FrameStrategy::RawMultiFrame));
        assert_eq!(
            "Envelope".parse::<FrameStrategy>(),
            Ok(FrameStrategy::StructuredEnvelope)
        );
        assert_eq!(
            "repeated-coordinates".parse::<FrameStrategy>(),
            Ok(FrameStrategy::RepeatedCoordinates)
        );
        assert_eq!(FrameStrategy::RepeatedCoordinates.name(), "repeated");
        assert!(FrameStrategy::RepeatedCoordinates.carries_label());
        assert!("json".parse::<FrameStrategy>().is_err());
        assert_eq!(FrameStrategy::default(), FrameStrategy::StructuredEnvelope);
    }
}
