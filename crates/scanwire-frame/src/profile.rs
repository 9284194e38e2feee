use std::io::{Read, Write};

use scanwire_codec::{ByteOrder, Profile, RowCodec};
use scanwire_transport::Stream;
use tracing::debug;

use crate::codec::FrameConfig;
use crate::error::Result;
use crate::reader::FrameReader;
use crate::strategy::FrameStrategy;
use crate::writer::FrameWriter;

/// Everything both ends of a profile channel must agree on.
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    /// How profiles are laid out as message parts.
    pub strategy: FrameStrategy,
    /// Byte order of encoded float64 values.
    pub byte_order: ByteOrder,
    /// Frame limits and transport timeouts.
    pub frame: FrameConfig,
}

impl ChannelConfig {
    pub fn row_codec(&self) -> RowCodec {
        RowCodec::new(self.byte_order)
    }
}

/// Sending half of a profile channel.
///
/// Each [`send`](Self::send) writes exactly one framed message. There is no
/// acknowledgement; delivery is up to the underlying stream.
pub struct ProfileSender<W> {
    writer: FrameWriter<W>,
    strategy: FrameStrategy,
    codec: RowCodec,
}

impl<W: Write> ProfileSender<W> {
    pub fn new(inner: W, config: &ChannelConfig) -> Self {
        Self::from_writer(FrameWriter::with_config(inner, config.frame.clone()), config)
    }

    pub fn from_writer(writer: FrameWriter<W>, config: &ChannelConfig) -> Self {
        Self {
            writer,
            strategy: config.strategy,
            codec: config.row_codec(),
        }
    }

    /// Encode and send one profile (blocking).
    pub fn send(&mut self, profile: &Profile) -> Result<()> {
        if !self.strategy.carries_label() && !profile.label.is_empty() {
            debug!(label = %profile.label, strategy = self.strategy.name(), "label not carried by strategy");
        }
        let parts = self.strategy.encode(profile, &self.codec)?;
        self.writer.send_message(&parts)?;
        debug!(
            label = %profile.label,
            points = profile.len(),
            strategy = self.strategy.name(),
            "sent profile"
        );
        Ok(())
    }

    pub fn strategy(&self) -> FrameStrategy {
        self.strategy
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Receiving half of a profile channel.
pub struct ProfileReceiver<R> {
    reader: FrameReader<R>,
    strategy: FrameStrategy,
    codec: RowCodec,
}

impl<R: Read> ProfileReceiver<R> {
    pub fn new(inner: R, config: &ChannelConfig) -> Self {
        Self::from_reader(FrameReader::with_config(inner, config.frame.clone()), config)
    }

    pub fn from_reader(reader: FrameReader<R>, config: &ChannelConfig) -> Self {
        Self {
            reader,
            strategy: config.strategy,
            codec: config.row_codec(),
        }
    }

    /// Block until one complete message arrives and decode it.
    ///
    /// A message that fails to decode is consumed and reported; the channel
    /// stays usable for the next message.
    pub fn recv(&mut self) -> Result<Profile> {
        let parts = self.reader.read_message()?;
        let profile = self.strategy.decode(&parts, &self.codec)?;
        debug!(
            label = %profile.label,
            points = profile.len(),
            strategy = self.strategy.name(),
            "received profile"
        );
        Ok(profile)
    }

    pub fn strategy(&self) -> FrameStrategy {
        self.strategy
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

/// Split a connected stream into a receiver and a sender sharing one connection.
pub fn open_duplex(
    stream: Stream,
    config: &ChannelConfig,
) -> Result<(ProfileReceiver<Stream>, ProfileSender<Stream>)> {
    let read_half = stream.try_clone()?;
    let reader = FrameReader::with_config_stream(read_half, config.frame.clone())?;
    let writer = FrameWriter::with_config_stream(stream, config.frame.clone())?;
    Ok((
        ProfileReceiver::from_reader(reader, config),
        ProfileSender::from_writer(writer, config),
    ))
}
