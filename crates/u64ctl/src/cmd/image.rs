use tracing::info;

use crate::cmd::{read_file, MountArgs, RunCrtArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn mount(args: MountArgs) -> CliResult<i32> {
    let data = read_file(&args.image_file)?;
    info!(file = %args.image_file.display(), bytes = data.len(), run = args.run, "mounting image");

    let mut writer = args.connect.open()?;
    if args.run {
        writer
            .run_image(&data)
            .map_err(|err| protocol_error("image run failed", err))?;
        println!("running image '{}'", args.image_file.display());
    } else {
        writer
            .mount_image(&data)
            .map_err(|err| protocol_error("image mount failed", err))?;
        println!("mounted image '{}'", args.image_file.display());
    }
    Ok(SUCCESS)
}

pub fn run_crt(args: RunCrtArgs) -> CliResult<i32> {
    let data = read_file(&args.crt_file)?;
    info!(file = %args.crt_file.display(), bytes = data.len(), "running cartridge");

    let mut writer = args.connect.open()?;
    writer
        .run_cartridge(&data)
        .map_err(|err| protocol_error("cartridge run failed", err))?;

    println!("running cartridge '{}'", args.crt_file.display());
    Ok(SUCCESS)
}
