use crate::cmd::{PoweroffArgs, ResetArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn reset(args: ResetArgs) -> CliResult<i32> {
    let mut writer = args.connect.open()?;
    writer
        .reset()
        .map_err(|err| protocol_error("reset failed", err))?;
    println!("resetting device");
    Ok(SUCCESS)
}

pub fn poweroff(args: PoweroffArgs) -> CliResult<i32> {
    let mut writer = args.connect.open()?;
    writer
        .power_off()
        .map_err(|err| protocol_error("poweroff failed", err))?;
    println!("powering off device");
    Ok(SUCCESS)
}
