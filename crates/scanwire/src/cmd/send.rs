use scanwire_codec::Profile;
use scanwire_frame::open_duplex;
use scanwire_transport::connect;
use tracing::info;

use crate::cmd::{parse_duration, Context, ProfileSource, SendArgs};
use crate::csv::load_points;
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::print_profile;

pub fn run(args: SendArgs, ctx: &Context) -> CliResult<i32> {
    let profiles = args
        .profiles
        .iter()
        .map(load_profile)
        .collect::<CliResult<Vec<_>>>()?;

    let mut config = ctx.channel.clone();
    if args.wait > 0 {
        config.frame.read_timeout = Some(parse_duration(&args.wait_timeout)?);
    }

    let stream =
        connect(&args.endpoint).map_err(|err| transport_error("connect failed", err))?;
    let (mut receiver, mut sender) =
        open_duplex(stream, &config).map_err(|err| frame_error("stream setup failed", err))?;

    for profile in &profiles {
        sender
            .send(profile)
            .map_err(|err| frame_error("send failed", err))?;
        info!(label = %profile.label, points = profile.len(), "profile sent");
    }

    let source = args.endpoint.to_string();
    for _ in 0..args.wait {
        let profile = receiver
            .recv()
            .map_err(|err| frame_error("receive failed", err))?;
        print_profile(&profile, &source, ctx.format);
    }

    Ok(SUCCESS)
}

fn load_profile(source: &ProfileSource) -> CliResult<Profile> {
    let points = load_points(&source.path).map_err(|err| {
        CliError::new(
            USAGE,
            format!("failed reading {}: {err}", source.path.display()),
        )
    })?;
    Ok(Profile::new(source.label.clone(), points))
}
