use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scanwire_align::{align, AlignConfig};
use scanwire_codec::Profile;
use scanwire_frame::{open_duplex, ProfileReceiver};
use scanwire_transport::Listener;
use tracing::{info, warn};

use crate::cmd::{
    classify_recv_error, install_ctrlc_handler, AlignArgs, Context, RecvErrorDisposition,
};
use crate::exit::{frame_error, transport_error, CliResult, SUCCESS};
use crate::output::print_alignment;

const FLANGE: &str = "Flange";
const TREAD: &str = "Tread";

pub fn run(args: AlignArgs, ctx: &Context) -> CliResult<i32> {
    let config = AlignConfig {
        max_iterations: args.max_iterations,
        distance_threshold: args.distance_threshold,
        min_point_pairs: args.min_pairs,
        ..AlignConfig::default()
    };

    let listener =
        Listener::bind(&args.endpoint).map_err(|err| transport_error("bind failed", err))?;
    info!(endpoint = %args.endpoint, strategy = ctx.channel.strategy.name(), "alignment server listening");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut connections = 0usize;

    while running.load(Ordering::SeqCst) {
        let stream = listener
            .accept()
            .map_err(|err| transport_error("accept failed", err))?;
        connections += 1;
        let source = format!("{}#{connections}", args.endpoint);
        let (mut receiver, mut sender) = open_duplex(stream, &ctx.channel)
            .map_err(|err| frame_error("stream setup failed", err))?;

        while running.load(Ordering::SeqCst) {
            let Some(first) = next_profile(&mut receiver)? else {
                break;
            };
            let Some(second) = next_profile(&mut receiver)? else {
                break;
            };

            let Some((flange, tread)) = pair_up(first, second) else {
                warn!("expected one Flange and one Tread profile; skipping pair");
                continue;
            };

            let alignment = align(&flange.points, &tread.points, &config);
            info!(
                points = alignment.points.len(),
                iterations = alignment.iterations,
                stop = alignment.stop.as_str(),
                "aligned flange onto tread"
            );
            print_alignment(&alignment, &source, ctx.format);

            let aligned = Profile::new(flange.label, alignment.points);
            if let Err(err) = sender.send(&aligned).and_then(|()| sender.send(&tread)) {
                warn!(error = %err, "failed sending aligned profiles; dropping connection");
                break;
            }

            if args.once {
                return Ok(SUCCESS);
            }
        }
    }

    Ok(SUCCESS)
}

/// Next decodable profile, or `None` once the peer is gone.
fn next_profile<R: Read>(receiver: &mut ProfileReceiver<R>) -> CliResult<Option<Profile>> {
    loop {
        match receiver.recv() {
            Ok(profile) => return Ok(Some(profile)),
            Err(err) => match classify_recv_error(err) {
                RecvErrorDisposition::Skip(err) => {
                    warn!(error = %err, "dropping undecodable message");
                }
                RecvErrorDisposition::Disconnect(err) => {
                    info!(reason = %err, "peer disconnected");
                    return Ok(None);
                }
                RecvErrorDisposition::Fatal(cli_err) => return Err(cli_err),
            },
        }
    }
}

/// Order a received pair as (flange, tread).
///
/// Unlabelled pairs (raw framing) are taken in arrival order.
fn pair_up(first: Profile, second: Profile) -> Option<(Profile, Profile)> {
    match (first.label.as_str(), second.label.as_str()) {
        (FLANGE, TREAD) | ("", "") => Some((first, second)),
        (TREAD, FLANGE) => Some((second, first)),
        _ => None,
    }
}
