//! Row and envelope codecs for 2D laser-scan point sets.
//!
//! Two layers, innermost first:
//! - [`row`]: packs `(x, y)` rows into a flat buffer of float64 values with an
//!   explicit byte order and no per-row framing
//! - [`envelope`]: wraps a row buffer plus a laser-type label into one
//!   Protocol Buffers message
//! - [`coordinates`]: the alternative nested layout with one Protocol Buffers
//!   message per point, independent of the row codec
//!
//! Both layers are pure functions over byte buffers and hold no shared state.

pub mod coordinates;
pub mod envelope;
pub mod error;
pub mod point;
pub mod row;

pub use coordinates::{decode_coordinates, encode_coordinates, Coordinate, Coordinates};
pub use envelope::{decode_profile, encode_profile, unwrap, unwrap_points, wrap, Envelope};
pub use error::{CodecError, Result};
pub use point::{Point, Profile};
pub use row::{ByteOrder, RowCodec, ROW_ARITY, ROW_STRIDE, VALUE_SIZE};
