use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};
use crate::point::Point;

/// Number of float64 values per row (one coordinate).
pub const ROW_ARITY: usize = 2;

/// Size of one encoded value in bytes.
pub const VALUE_SIZE: usize = std::mem::size_of::<f64>();

/// Size of one encoded row in bytes.
pub const ROW_STRIDE: usize = ROW_ARITY * VALUE_SIZE;

/// Byte order of encoded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Packs point rows into flat float64 buffers and back.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────┬──────────┬─────┐
/// │ x0 (8B)  │ y0 (8B)  │ x1 (8B)  │ y1 (8B)  │ ... │
/// └──────────┴──────────┴──────────┴──────────┴─────┘
/// ```
///
/// There is no header and no per-row prefix; both ends must agree on the
/// arity and byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCodec {
    order: ByteOrder,
}

impl RowCodec {
    pub const fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Encode rows of raw values, rejecting any row whose arity is not
    /// [`ROW_ARITY`].
    ///
    /// Shape is checked for every row before anything is written.
    pub fn encode<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Bytes> {
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != ROW_ARITY)
        {
            return Err(CodecError::Shape {
                row,
                found,
                expected: ROW_ARITY,
            });
        }

        let mut dst = BytesMut::with_capacity(rows.len() * ROW_STRIDE);
        for row in rows {
            for &value in row.as_ref() {
                self.put_value(&mut dst, value);
            }
        }
        Ok(dst.freeze())
    }

    /// Encode points. Points always have the right arity, so this cannot fail.
    pub fn encode_points(&self, points: &[Point]) -> Bytes {
        let mut dst = BytesMut::with_capacity(points.len() * ROW_STRIDE);
        for point in points {
            self.put_value(&mut dst, point.x);
            self.put_value(&mut dst, point.y);
        }
        dst.freeze()
    }

    /// Decode a row buffer into points, preserving order.
    ///
    /// The length is validated up front so a bad buffer never yields a
    /// partial result.
    pub fn decode(&self, buf: &[u8]) -> Result<Vec<Point>> {
        check_alignment(buf.len())?;

        let mut src = buf;
        let mut points = Vec::with_capacity(buf.len() / ROW_STRIDE);
        while src.has_remaining() {
            let x = self.get_value(&mut src);
            let y = self.get_value(&mut src);
            points.push(Point { x, y });
        }
        Ok(points)
    }

    fn put_value(&self, dst: &mut BytesMut, value: f64) {
        match self.order {
            ByteOrder::Little => dst.put_f64_le(value),
            ByteOrder::Big => dst.put_f64(value),
        }
    }

    fn get_value(&self, src: &mut &[u8]) -> f64 {
        match self.order {
            ByteOrder::Little => src.get_f64_le(),
            ByteOrder::Big => src.get_f64(),
        }
    }
}

/// Check that `len` bytes hold a whole number of rows.
pub fn check_alignment(len: usize) -> Result<()> {
    if len % ROW_STRIDE != 0 {
        return Err(CodecError::Alignment {
            len,
            stride: ROW_STRIDE,
        });
    }
    Ok(())
}
