use tracing::info;

use crate::cmd::{StreamOffArgs, StreamOnArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn on(args: StreamOnArgs) -> CliResult<i32> {
    info!(channel = %args.channel, duration = args.duration, addr = ?args.addr, "stream on");

    let mut writer = args.connect.open()?;
    writer
        .stream_on(args.channel, args.duration, args.addr.as_deref())
        .map_err(|err| protocol_error("stream enable failed", err))?;

    println!("{} stream enabled", args.channel);
    Ok(SUCCESS)
}

pub fn off(args: StreamOffArgs) -> CliResult<i32> {
    let mut writer = args.connect.open()?;
    writer
        .stream_off(args.channel)
        .map_err(|err| protocol_error("stream disable failed", err))?;

    println!("{} stream disabled", args.channel);
    Ok(SUCCESS)
}
