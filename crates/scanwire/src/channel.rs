use clap::{Args, ValueEnum};
use scanwire_codec::ByteOrder;
use scanwire_frame::{ChannelConfig, FrameConfig, FrameStrategy, DEFAULT_MAX_PAYLOAD};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum StrategyArg {
    /// One Protocol Buffers envelope per profile (carries the label).
    Envelope,
    /// Count, arity and value blob as three frames (no label).
    Raw,
    /// One Protocol Buffers message with a nested message per point.
    Repeated,
}

impl From<StrategyArg> for FrameStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Envelope => FrameStrategy::StructuredEnvelope,
            StrategyArg::Raw => FrameStrategy::RawMultiFrame,
            StrategyArg::Repeated => FrameStrategy::RepeatedCoordinates,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ByteOrderArg {
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}

/// Channel settings shared by every subcommand. Both peers must agree.
#[derive(Args, Debug)]
pub struct ChannelArgs {
    /// How profiles are framed on the wire.
    #[arg(
        long,
        value_name = "STRATEGY",
        default_value = "envelope",
        env = "SCANWIRE_STRATEGY",
        global = true
    )]
    pub strategy: StrategyArg,

    /// Byte order of encoded coordinates.
    #[arg(
        long,
        value_name = "ORDER",
        default_value = "little",
        env = "SCANWIRE_BYTE_ORDER",
        global = true
    )]
    pub byte_order: ByteOrderArg,

    /// Largest accepted frame payload in bytes.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_PAYLOAD,
        env = "SCANWIRE_MAX_PAYLOAD",
        global = true
    )]
    pub max_payload: usize,
}

impl ChannelArgs {
    pub fn to_config(&self) -> ChannelConfig {
        ChannelConfig {
            strategy: self.strategy.into(),
            byte_order: self.byte_order.into(),
            frame: FrameConfig {
                max_payload_size: self.max_payload,
                ..FrameConfig::default()
            },
        }
    }
}
