use tracing::info;

use crate::cmd::{read_file, PrgLoadArgs};
use crate::exit::{protocol_error, CliError, CliResult, DATA_INVALID, SUCCESS};

pub fn run(args: PrgLoadArgs) -> CliResult<i32> {
    let data = read_file(&args.prg_file)?;
    if data.len() < 2 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{}: not a PRG file (shorter than 2 bytes)", args.prg_file.display()),
        ));
    }

    // The first two bytes of a PRG are its load address.
    let load_addr = u16::from_le_bytes([data[0], data[1]]);
    info!(
        file = %args.prg_file.display(),
        load_addr,
        bytes = data.len(),
        "loading prg"
    );

    let mut writer = args.connect.open()?;
    let result = if args.jump {
        println!("loading '{}' @{load_addr:04x}, jump", args.prg_file.display());
        writer.dma_jump(&data)
    } else if args.run {
        println!("loading '{}' @{load_addr:04x}, run", args.prg_file.display());
        writer.dma_run(&data)
    } else {
        println!("loading '{}' @{load_addr:04x}", args.prg_file.display());
        writer.dma_load(&data)
    };
    result.map_err(|err| protocol_error("prg load failed", err))?;

    Ok(SUCCESS)
}
