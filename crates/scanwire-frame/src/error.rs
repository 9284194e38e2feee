use scanwire_codec::CodecError;
use scanwire_transport::TransportError;

/// Errors that can occur while framing, sending or receiving profiles.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame header contains an invalid magic number.
    #[error("invalid frame magic (expected 0x5357 \"SW\")")]
    InvalidMagic,

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,

    /// A message ran past the configured part limit. The rest of it is
    /// still on the stream, so the connection is out of sync.
    #[error("message exceeds {max} parts")]
    TooManyParts { max: usize },

    /// A message had a different number of parts than its strategy expects.
    #[error("expected {expected} message part(s), got {found}")]
    UnexpectedPartCount { expected: usize, found: usize },

    /// A count frame of the raw strategy is malformed or negative.
    #[error("invalid element count frame: {0}")]
    InvalidElementCount(String),

    /// The declared element count disagrees with the value blob.
    #[error("declared {declared} elements but blob holds {actual}")]
    ElementCountMismatch { declared: usize, actual: usize },

    /// The points could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<TransportError> for FrameError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Io(io) | TransportError::Accept(io) => Self::Io(io),
            TransportError::Bind { source, .. } | TransportError::Connect { source, .. } => {
                Self::Io(source)
            }
            other => Self::Io(std::io::Error::other(other.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
