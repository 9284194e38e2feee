mod channel;
mod cmd;
mod csv;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::channel::ChannelArgs;
use crate::cmd::{Command, Context};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "scanwire", version, about = "Laser-scan profile transport CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", env = "SCANWIRE_FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        env = "SCANWIRE_LOG_FORMAT",
        global = true
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "SCANWIRE_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(flatten)]
    channel: ChannelArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let ctx = Context {
        format: cli.format.unwrap_or_else(OutputFormat::default_for_stdout),
        channel: cli.channel.to_config(),
    };
    let result = cmd::run(cli.command, &ctx);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use scanwire_codec::ByteOrder;
    use scanwire_frame::FrameStrategy;
    use scanwire_transport::Endpoint;

    use super::*;

    #[test]
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from([
            "scanwire",
            "send",
            "tcp://localhost:5555",
            "--profile",
            "Flange=flange.csv",
            "--profile",
            "Tread=tread.csv",
            "--wait",
            "2",
        ])
        .expect("send args should parse");

        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert_eq!(
            args.endpoint,
            Endpoint::Tcp {
                host: "localhost".into(),
                port: 5555
            }
        );
        assert_eq!(args.profiles.len(), 2);
        assert_eq!(args.profiles[1].label, "Tread");
        assert_eq!(args.wait, 2);
    }

    #[test]
    fn send_requires_a_profile() {
        let err = Cli::try_parse_from(["scanwire", "send", "/tmp/scan.sock"])
            .expect_err("missing --profile should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_malformed_profile_arg() {
        let err = Cli::try_parse_from([
            "scanwire",
            "send",
            "/tmp/scan.sock",
            "--profile",
            "flange.csv",
        ])
        .expect_err("profile without label should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_channel_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scanwire",
            "listen",
            "unix:///tmp/scan.sock",
            "--strategy",
            "raw",
            "--byte-order",
            "big",
            "--max-payload",
            "1024",
        ])
        .expect("listen args should parse");

        let config = cli.channel.to_config();
        assert_eq!(config.strategy, FrameStrategy::RawMultiFrame);
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.frame.max_payload_size, 1024);
        assert!(matches!(cli.command, Command::Listen(_)));
    }

    #[test]
    fn channel_defaults() {
        let cli = Cli::try_parse_from(["scanwire", "align", "tcp://*:5555", "--once"])
            .expect("align args should parse");

        let config = cli.channel.to_config();
        assert_eq!(config.strategy, FrameStrategy::StructuredEnvelope);
        assert_eq!(config.byte_order, ByteOrder::Little);
        assert!(matches!(cli.command, Command::Align(ref args) if args.once));
    }

    #[test]
    fn repeated_strategy_flag() {
        let cli = Cli::try_parse_from([
            "scanwire",
            "--strategy",
            "repeated",
            "listen",
            "unix:///tmp/scan.sock",
        ])
        .expect("repeated strategy should parse");

        assert_eq!(
            cli.channel.to_config().strategy,
            FrameStrategy::RepeatedCoordinates
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        let err = Cli::try_parse_from(["scanwire", "listen", "tcp://localhost"])
            .expect_err("tcp endpoint without port should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
