use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use scanwire_transport::Stream;

use crate::codec::{encode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete frames and multi-part messages to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Write a complete frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        self.encode_part(frame.more, frame.payload.as_ref())?;
        self.flush_buffer()
    }

    /// Send a single-part message.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.send_message(&[payload])
    }

    /// Send a message of one or more parts (blocking).
    ///
    /// Every part but the last carries the MORE flag. The part count and
    /// every part's size are checked before any byte reaches the stream, so
    /// a rejected message is never half-written.
    pub fn send_message<P: AsRef<[u8]>>(&mut self, parts: &[P]) -> Result<()> {
        if parts.len() > self.config.max_message_parts {
            return Err(FrameError::TooManyParts {
                max: self.config.max_message_parts,
            });
        }
        self.buf.clear();
        let last = parts.len().saturating_sub(1);
        for (index, part) in parts.iter().enumerate() {
            self.encode_part(index < last, part.as_ref())?;
        }
        self.flush_buffer()
    }

    fn encode_part(&mut self, more: bool, payload: &[u8]) -> Result<()> {
        if payload.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }
        encode_frame(more, payload, &mut self.buf)
    }

    fn flush_buffer(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }


    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl FrameWriter<Stream> {
    /// Create a frame writer for a transport stream and apply the write timeout from config.
    pub fn with_config_stream(inner: Stream, config: FrameConfig) -> Result<Self> {
        inner.set_write_timeout(config.write_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}
