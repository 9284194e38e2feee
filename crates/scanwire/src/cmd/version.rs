use scanwire_frame::{FLAG_MORE, HEADER_SIZE};

use crate::cmd::{Context, VersionArgs};
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs, ctx: &Context) -> CliResult<i32> {
    if !args.extended {
        println!("scanwire {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: scanwire");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("SCANWIRE_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "frame: magic=\"SW\" header={HEADER_SIZE} more_flag={FLAG_MORE:#06x} max_payload={}",
        ctx.channel.frame.max_payload_size
    );
    println!(
        "channel: strategy={} byte_order={:?}",
        ctx.channel.strategy.name(),
        ctx.channel.byte_order
    );
    println!("features: align={}, cli=true", cfg!(feature = "align"));

    Ok(SUCCESS)
}
