use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::Result;

/// A connected byte stream. Implements Read + Write.
///
/// This is the fundamental I/O type returned by transport operations.
pub struct Stream {
    inner: StreamInner,
}

enum StreamInner {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(std::os::unix::net::UnixStream),
}

macro_rules! with_inner {
    ($inner:expr, $s:ident => $body:expr) => {
        match $inner {
            StreamInner::Tcp($s) => $body,
            #[cfg(unix)]
            StreamInner::Unix($s) => $body,
        }
    };
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        with_inner!(&mut self.inner, s => s.read(buf))
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        with_inner!(&mut self.inner, s => s.write(buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        with_inner!(&mut self.inner, s => s.flush())
    }
}

impl Stream {
    pub(crate) fn from_tcp(stream: TcpStream) -> Self {
        Self {
            inner: StreamInner::Tcp(stream),
        }
    }

    #[cfg(unix)]
    pub(crate) fn from_unix(stream: std::os::unix::net::UnixStream) -> Self {
        Self {
            inner: StreamInner::Unix(stream),
        }
    }

    /// Set read timeout on the underlying stream.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        with_inner!(&self.inner, s => s.set_read_timeout(timeout).map_err(Into::into))
    }

    /// Set write timeout on the underlying stream.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        with_inner!(&self.inner, s => s.set_write_timeout(timeout).map_err(Into::into))
    }

    /// Try to clone this stream (creates a new file descriptor).
    ///
    /// Used to split one connection into an independent reader and writer.
    pub fn try_clone(&self) -> Result<Self> {
        match &self.inner {
            StreamInner::Tcp(stream) => Ok(Self::from_tcp(stream.try_clone()?)),
            #[cfg(unix)]
            StreamInner::Unix(stream) => Ok(Self::from_unix(stream.try_clone()?)),
        }
    }

    /// Shut down both halves of the connection.
    pub fn shutdown(&self) -> Result<()> {
        with_inner!(&self.inner, s => s.shutdown(std::net::Shutdown::Both).map_err(Into::into))
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match &self.inner {
            StreamInner::Tcp(_) => "tcp",
            #[cfg(unix)]
            StreamInner::Unix(_) => "unix-domain-socket",
        }
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            StreamInner::Tcp(stream) => f
                .debug_struct("Stream")
                .field("type", &"tcp")
                .field("peer", &stream.peer_addr().ok())
                .finish(),
            #[cfg(unix)]
            StreamInner::Unix(_) => f.debug_struct("Stream").field("type", &"unix").finish(),
        }
    }
}
