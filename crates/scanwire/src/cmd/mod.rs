use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use scanwire_frame::{ChannelConfig, FrameError};
use scanwire_transport::Endpoint;

use crate::exit::{frame_error, CliError, CliResult, INTERNAL, INTERRUPTED, USAGE};
use crate::output::OutputFormat;

pub mod align;
pub mod listen;
pub mod send;
pub mod version;

/// Settings resolved from global flags.
pub struct Context {
    pub format: OutputFormat,
    pub channel: ChannelConfig,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send CSV profiles to a listening peer.
    Send(SendArgs),
    /// Listen and print received profiles.
    Listen(ListenArgs),
    /// Serve flange-to-tread alignment requests.
    Align(AlignArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, ctx: &Context) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, ctx),
        Command::Listen(args) => listen::run(args, ctx),
        Command::Align(args) => align::run(args, ctx),
        Command::Version(args) => version::run(args, ctx),
    }
}

/// A `LABEL=PATH` pair naming one CSV profile.
#[derive(Clone, Debug)]
pub struct ProfileSource {
    pub label: String,
    pub path: PathBuf,
}

fn parse_profile_source(input: &str) -> Result<ProfileSource, String> {
    let (label, path) = input
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PATH, got {input:?}"))?;
    if path.is_empty() {
        return Err("profile path must not be empty".to_string());
    }
    Ok(ProfileSource {
        label: label.to_string(),
        path: PathBuf::from(path),
    })
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Endpoint to connect to (tcp://host:port, unix:///path or a socket path).
    pub endpoint: Endpoint,
    /// Profile to send as LABEL=CSV; repeat to send several in order.
    #[arg(long = "profile", value_name = "LABEL=CSV", required = true, value_parser = parse_profile_source)]
    pub profiles: Vec<ProfileSource>,
    /// After sending, wait for N profiles on the same connection and print them.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub wait: usize,
    /// Maximum time to wait for each reply when --wait is set (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub wait_timeout: String,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Endpoint to bind.
    pub endpoint: Endpoint,
    /// Exit after receiving N profiles.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Endpoint to bind.
    pub endpoint: Endpoint,
    /// Exit after answering one flange/tread pair.
    #[arg(long)]
    pub once: bool,
    /// Iteration budget per alignment.
    #[arg(long, default_value_t = 1000)]
    pub max_iterations: usize,
    /// Maximum distance between paired points.
    #[arg(long, default_value_t = 1.5)]
    pub distance_threshold: f64,
    /// Minimum number of point pairs to keep iterating.
    #[arg(long, default_value_t = 10)]
    pub min_pairs: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show build target and wire defaults.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) enum RecvErrorDisposition {
    /// The message was consumed; keep reading from the same connection.
    Skip(FrameError),
    /// The peer is gone or the stream lost sync; drop the connection.
    Disconnect(FrameError),
    Fatal(CliError),
}

pub(crate) fn classify_recv_error(err: FrameError) -> RecvErrorDisposition {
    match err {
        FrameError::Codec(_)
        | FrameError::UnexpectedPartCount { .. }
        | FrameError::InvalidElementCount(_)
        | FrameError::ElementCountMismatch { .. } => RecvErrorDisposition::Skip(err),
        FrameError::ConnectionClosed
        | FrameError::InvalidMagic
        | FrameError::PayloadTooLarge { .. }
        | FrameError::TooManyParts { .. } => RecvErrorDisposition::Disconnect(err),
        FrameError::Io(io) if io.kind() == std::io::ErrorKind::ConnectionReset => {
            RecvErrorDisposition::Disconnect(FrameError::Io(io))
        }
        other => RecvErrorDisposition::Fatal(frame_error("receive failed", other)),
    }
}

/// First Ctrl-C asks the loops to stop after the current message; the second exits.
pub(crate) fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        if !running.swap(false, Ordering::SeqCst) {
            std::process::exit(INTERRUPTED);
        }
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}
