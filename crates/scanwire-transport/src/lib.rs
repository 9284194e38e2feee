//! Byte-stream transports for scanwire peers.
//!
//! Provides a unified interface over the local and network transports a
//! scan producer and its processing peer talk over:
//! - Unix domain sockets (Linux/macOS)
//! - TCP
//!
//! This is the lowest layer of scanwire. Framing and the point codecs build
//! on top of the [`Stream`] type provided here. There is no process-wide
//! transport state; every stream is an explicit handle owned by its caller.

pub mod endpoint;
pub mod error;
pub mod listener;
pub mod stream;

#[cfg(unix)]
pub mod unix;

pub use endpoint::Endpoint;
pub use error::{Result, TransportError};
pub use listener::{connect, Listener};
pub use stream::Stream;

#[cfg(unix)]
pub use unix::UnixSocketListener;
