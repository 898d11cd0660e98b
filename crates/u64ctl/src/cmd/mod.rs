use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Subcommand};
use u64ctl_proto::{CommandWriter, StreamChannel};
use u64ctl_transport::DEFAULT_PORT;

use crate::exit::{transport_error, CliError, CliResult, USAGE};

pub mod image;
pub mod kernal_load;
pub mod keyb;
pub mod mem_write;
pub mod power;
pub mod prg_load;
pub mod reu_load;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a PRG file into memory, optionally RUN or JMP it.
    PrgLoad(PrgLoadArgs),
    /// Upload a file into REU memory in chunks.
    ReuLoad(ReuLoadArgs),
    /// Write a file's bytes at a C64 memory address.
    MemWrite(MemWriteArgs),
    /// Flash a kernal ROM image.
    KernalLoad(KernalLoadArgs),
    /// Type text on the device keyboard ({nl}, {cr} macros supported).
    Keyb(KeybArgs),
    /// Mount a disk image, optionally run it.
    Mount(MountArgs),
    /// Run a cartridge image.
    RunCrt(RunCrtArgs),
    /// Reset the machine.
    Reset(ResetArgs),
    /// Power the machine off.
    Poweroff(PoweroffArgs),
    /// Enable a real-time stream (vic, audio or debug).
    StreamOn(StreamOnArgs),
    /// Disable a real-time stream.
    StreamOff(StreamOffArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::PrgLoad(args) => prg_load::run(args),
        Command::ReuLoad(args) => reu_load::run(args),
        Command::MemWrite(args) => mem_write::run(args),
        Command::KernalLoad(args) => kernal_load::run(args),
        Command::Keyb(args) => keyb::run(args),
        Command::Mount(args) => image::mount(args),
        Command::RunCrt(args) => image::run_crt(args),
        Command::Reset(args) => power::reset(args),
        Command::Poweroff(args) => power::poweroff(args),
        Command::StreamOn(args) => stream::on(args),
        Command::StreamOff(args) => stream::off(args),
        Command::Version(args) => version::run(args),
    }
}

/// Connection options shared by all device subcommands.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Device hostname or IP.
    #[arg(long, short = 'H', env = "U64CTL_HOST")]
    pub host: String,
    /// Device control port.
    #[arg(long, short = 'p', env = "U64CTL_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Connect timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub connect_timeout: String,
}

impl ConnectArgs {
    /// Open the device session.
    pub fn open(&self) -> CliResult<CommandWriter<TcpStream>> {
        let timeout = parse_duration(&self.connect_timeout)?;
        let stream = u64ctl_transport::connect_timeout(&self.host, self.port, timeout)
            .map_err(|err| transport_error("connect failed", err))?;
        Ok(CommandWriter::new(stream))
    }
}

#[derive(Args, Debug)]
pub struct PrgLoadArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// PRG file (2-byte load address header + data).
    pub prg_file: PathBuf,
    /// RUN the program after loading.
    #[arg(long, short = 'r', conflicts_with = "jump")]
    pub run: bool,
    /// JMP to the load address after loading.
    #[arg(long, short = 'j', conflicts_with = "run")]
    pub jump: bool,
}

#[derive(Args, Debug)]
pub struct ReuLoadArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// File to upload.
    pub reu_file: PathBuf,
    /// Target REU address.
    #[arg(long, short = 'a', value_parser = based_u32, default_value = "0")]
    pub addr: u32,
    /// Byte offset to start the upload at.
    #[arg(long, short = 'o', value_parser = based_usize, default_value = "0")]
    pub offset: usize,
    /// Upload at most this many bytes (0 = whole file).
    #[arg(long, short = 's', value_parser = based_usize, default_value = "0")]
    pub size: usize,
}

#[derive(Args, Debug)]
pub struct MemWriteArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Target C64 address.
    #[arg(value_parser = based_u16)]
    pub addr: u16,
    /// File whose bytes are written.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct KernalLoadArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Kernal ROM image.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct KeybArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Text to type; {name} expands to a control byte.
    pub text: String,
    /// Fail on unknown macro names instead of dropping them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct MountArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Disk image file (d64 etc).
    pub image_file: PathBuf,
    /// Run the mounted image.
    #[arg(long, short = 'r')]
    pub run: bool,
}

#[derive(Args, Debug)]
pub struct RunCrtArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Cartridge image file.
    pub crt_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct PoweroffArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct StreamOnArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Stream channel: vic, audio or debug.
    #[arg(value_parser = stream_channel)]
    pub channel: StreamChannel,
    /// Stream duration in device ticks (0 = until disabled).
    #[arg(long, short = 'd', value_parser = based_u16, default_value = "0")]
    pub duration: u16,
    /// Destination address (host:port) the device should push to.
    #[arg(long, short = 'a')]
    pub addr: Option<String>,
}

#[derive(Args, Debug)]
pub struct StreamOffArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Stream channel: vic, audio or debug.
    #[arg(value_parser = stream_channel)]
    pub channel: StreamChannel,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn stream_channel(value: &str) -> Result<StreamChannel, String> {
    value.parse()
}

/// Parse an integer with a C-style base prefix: `0x` hex, leading `0`
/// octal, decimal otherwise.
fn based_int(value: &str) -> Result<u64, String> {
    let parsed = if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else if value.len() > 1 && value.starts_with('0') {
        u64::from_str_radix(&value[1..], 8)
    } else {
        value.parse()
    };
    parsed.map_err(|_| format!("'{value}' is not a valid integer"))
}

fn based_u16(value: &str) -> Result<u16, String> {
    let n = based_int(value)?;
    u16::try_from(n).map_err(|_| format!("'{value}' does not fit in 16 bits"))
}

fn based_u32(value: &str) -> Result<u32, String> {
    let n = based_int(value)?;
    u32::try_from(n).map_err(|_| format!("'{value}' does not fit in 32 bits"))
}

fn based_usize(value: &str) -> Result<usize, String> {
    let n = based_int(value)?;
    usize::try_from(n).map_err(|_| format!("'{value}' is out of range"))
}

/// Parse a timeout like `5s`, `500ms` or a bare number of seconds.
fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();

    let (number, millis_per_unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, 1)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, 1000)
    } else {
        (input, 1000)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration: '{input}'")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(Duration::from_millis(value * millis_per_unit))
}

pub fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|err| crate::exit::io_error(&format!("failed reading {}", path.display()), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn based_int_accepts_all_bases() {
        assert_eq!(based_int("0x1000").unwrap(), 0x1000);
        assert_eq!(based_int("0X10").unwrap(), 16);
        assert_eq!(based_int("0755").unwrap(), 0o755);
        assert_eq!(based_int("1234").unwrap(), 1234);
        assert_eq!(based_int("0").unwrap(), 0);
    }

    #[test]
    fn based_int_rejects_garbage() {
        assert!(based_int("").is_err());
        assert!(based_int("0xzz").is_err());
        assert!(based_int("12ab").is_err());
        assert!(based_int("098").is_err());
    }

    #[test]
    fn based_u16_range_checked() {
        assert_eq!(based_u16("0xFFFF").unwrap(), 0xFFFF);
        assert!(based_u16("0x10000").is_err());
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
    }
}
