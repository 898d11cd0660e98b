use tracing::info;

use crate::cmd::{read_file, KernalLoadArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn run(args: KernalLoadArgs) -> CliResult<i32> {
    let data = read_file(&args.file)?;
    info!(file = %args.file.display(), bytes = data.len(), "kernal write");

    let mut writer = args.connect.open()?;
    writer
        .kernal_write(&data)
        .map_err(|err| protocol_error("kernal write failed", err))?;

    println!("flashed kernal image '{}'", args.file.display());
    Ok(SUCCESS)
}
