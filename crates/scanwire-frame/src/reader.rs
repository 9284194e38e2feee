use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use scanwire_transport::Stream;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames and multi-part messages from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read every part of the next message (blocking).
    ///
    /// Frames are collected until one arrives without the MORE flag. EOF in
    /// the middle of a message is reported as `ConnectionClosed`. A message
    /// still marked MORE at `max_message_parts` frames fails with
    /// `TooManyParts` without reading further.
    pub fn read_message(&mut self) -> Result<Vec<Bytes>> {
        let mut parts = Vec::new();
        loop {
            let frame = self.read_frame()?;
            parts.push(frame.payload);
            if !frame.more {
                return Ok(parts);
            }
            if parts.len() >= self.config.max_message_parts {
                return Err(FrameError::TooManyParts {
                    max: self.config.max_message_parts,
                });
            }
        }
    }


    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl FrameReader<Stream> {
    /// Create a frame reader for a transport stream and apply the read timeout from config.
    pub fn with_config_stream(inner: Stream, config: FrameConfig) -> Result<Self> {
        inner.set_read_timeout(config.read_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}
