use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scanwire_frame::{FrameReader, ProfileReceiver};
use scanwire_transport::Listener;
use tracing::{info, warn};

use crate::cmd::{classify_recv_error, install_ctrlc_handler, Context, ListenArgs, RecvErrorDisposition};
use crate::exit::{frame_error, transport_error, CliResult, SUCCESS};
use crate::output::print_profile;

pub fn run(args: ListenArgs, ctx: &Context) -> CliResult<i32> {
    let listener =
        Listener::bind(&args.endpoint).map_err(|err| transport_error("bind failed", err))?;
    info!(endpoint = %args.endpoint, strategy = ctx.channel.strategy.name(), "listening");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;
    let mut connections = 0usize;

    while running.load(Ordering::SeqCst) {
        let stream = listener
            .accept()
            .map_err(|err| transport_error("accept failed", err))?;
        connections += 1;
        let source = format!("{}#{connections}", args.endpoint);
        let reader = FrameReader::with_config_stream(stream, ctx.channel.frame.clone())
            .map_err(|err| frame_error("stream setup failed", err))?;
        let mut receiver = ProfileReceiver::from_reader(reader, &ctx.channel);

        while running.load(Ordering::SeqCst) {
            let profile = match receiver.recv() {
                Ok(profile) => profile,
                Err(err) => match classify_recv_error(err) {
                    RecvErrorDisposition::Skip(err) => {
                        warn!(error = %err, "dropping undecodable message");
                        continue;
                    }
                    RecvErrorDisposition::Disconnect(err) => {
                        info!(reason = %err, "peer disconnected");
                        break;
                    }
                    RecvErrorDisposition::Fatal(cli_err) => return Err(cli_err),
                },
            };

            print_profile(&profile, &source, ctx.format);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    return Ok(SUCCESS);
                }
            }
        }
    }

    Ok(SUCCESS)
}
