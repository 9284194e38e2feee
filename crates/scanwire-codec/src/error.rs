/// Errors that can occur while encoding or decoding point sets.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A row handed to the encoder does not have the fixed row arity.
    #[error("row {row} has {found} values (expected {expected})")]
    Shape {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A row buffer is not a whole number of rows long.
    #[error("row buffer of {len} bytes is not a multiple of the {stride}-byte row stride")]
    Alignment { len: usize, stride: usize },

    /// The outer envelope could not be parsed.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] prost::DecodeError),

    /// The envelope parsed, but its payload is not a whole number of rows long.
    #[error("corrupt envelope payload ({len} bytes, row stride {stride})")]
    CorruptPayload { len: usize, stride: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
