//! Serialization and transport of 2D laser-scan profiles.
//!
//! A profile is an ordered list of (x, y) points with a label such as
//! "Flange" or "Tread". scanwire packs profiles into flat float64 rows, wraps
//! them in a small Protocol Buffers envelope (or a raw three-part message),
//! and moves them over Unix domain sockets or TCP as length-prefixed frames.
//!
//! # Crate Structure
//!
//! - [`codec`]: points, profiles, the row codec and the envelope
//! - [`transport`]: endpoints, listeners and byte streams (Unix sockets, TCP)
//! - [`frame`]: multi-part framing, strategies and profile channels
//! - [`align`]: iterative closest point alignment (behind `align` feature)

/// Re-export codec types.
pub mod codec {
    pub use scanwire_codec::*;
}

/// Re-export transport types.
pub mod transport {
    pub use scanwire_transport::*;
}

/// Re-export frame and channel types.
pub mod frame {
    pub use scanwire_frame::*;
}

/// Re-export alignment types (requires `align` feature).
#[cfg(feature = "align")]
pub mod align {
    pub use scanwire_align::*;
}
