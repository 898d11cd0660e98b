use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use u64ctl_proto::{chunk_iter, REU_MAX_SIZE};

use crate::cmd::{read_file, ReuLoadArgs};
use crate::exit::{protocol_error, CliResult, INTERNAL, SUCCESS};

pub fn run(args: ReuLoadArgs) -> CliResult<i32> {
    let data = read_file(&args.reu_file)?;

    // A nonzero --size caps the transfer; otherwise the whole file goes up.
    let total_size = if args.size > 0 { args.size } else { data.len() };
    info!(
        file = %args.reu_file.display(),
        kib = total_size / 1024,
        offset = args.offset,
        addr = args.addr,
        "uploading to REU"
    );

    let mut writer = args.connect.open()?;

    let bar = ProgressBar::new(total_size as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .map_err(|err| crate::exit::CliError::new(INTERNAL, err.to_string()))?
            .progress_chars("#>-"),
    );

    let mut sent = 0usize;
    for (offset, chunk) in chunk_iter(&data, args.offset, total_size, REU_MAX_SIZE) {
        debug!(offset, len = chunk.len(), "reu chunk");
        writer
            .reu_write(args.addr + offset as u32, chunk)
            .map_err(|err| protocol_error("REU upload failed", err))?;
        bar.inc(chunk.len() as u64);
        sent += chunk.len();
    }
    bar.finish();

    println!("uploaded {sent} bytes to REU @{:06x}", args.addr + args.offset as u32);
    Ok(SUCCESS)
}
