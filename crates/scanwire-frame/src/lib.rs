//! Length-prefixed multi-part framing and profile channels.
//!
//! Every frame on the wire carries:
//! - A 2-byte magic number ("SW") for stream synchronization
//! - A 4-byte little-endian payload length
//! - A 2-byte little-endian flags word; bit 0 (MORE) marks that another part
//!   of the same message follows
//!
//! On top of frames, a [`FrameStrategy`] lays a labelled profile out as the
//! parts of one message, and [`ProfileSender`] / [`ProfileReceiver`] are the
//! explicit channel handles that send and receive whole profiles.

pub mod codec;
pub mod error;
pub mod profile;
pub mod reader;
pub mod strategy;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_MESSAGE_PARTS, DEFAULT_MAX_PAYLOAD,
    FLAG_MORE, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use profile::{open_duplex, ChannelConfig, ProfileReceiver, ProfileSender};
pub use reader::FrameReader;
pub use strategy::FrameStrategy;
pub use writer::FrameWriter;
