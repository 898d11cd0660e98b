use tracing::info;

use crate::cmd::{read_file, MemWriteArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn run(args: MemWriteArgs) -> CliResult<i32> {
    let data = read_file(&args.file)?;
    info!(
        file = %args.file.display(),
        addr = args.addr,
        bytes = data.len(),
        "memory write"
    );

    let mut writer = args.connect.open()?;
    writer
        .mem_write(args.addr, &data)
        .map_err(|err| protocol_error("memory write failed", err))?;

    println!("wrote {} bytes @{:04x}", data.len(), args.addr);
    Ok(SUCCESS)
}
