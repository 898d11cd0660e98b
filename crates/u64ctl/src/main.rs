mod cmd;
mod exit;
mod logging;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "u64ctl", version, about = "Ultimate64/1541U remote control CLI")]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reset_subcommand() {
        let cli = Cli::try_parse_from(["u64ctl", "reset", "--host", "c64.local"])
            .expect("reset args should parse");
        assert!(matches!(cli.command, Command::Reset(_)));
    }

    #[test]
    fn parses_prg_load_flags() {
        let cli = Cli::try_parse_from([
            "u64ctl", "prg-load", "--host", "10.0.0.5", "--port", "6464", "game.prg", "--run",
        ])
        .expect("prg-load args should parse");
        match cli.command {
            Command::PrgLoad(args) => {
                assert!(args.run);
                assert!(!args.jump);
                assert_eq!(args.connect.port, 6464);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_run_and_jump_together() {
        let err = Cli::try_parse_from([
            "u64ctl", "prg-load", "--host", "h", "game.prg", "--run", "--jump",
        ])
        .expect_err("conflicting flags should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_reu_load_based_ints() {
        let cli = Cli::try_parse_from([
            "u64ctl", "reu-load", "--host", "h", "data.bin", "--addr", "0x10000", "--offset",
            "0400", "--size", "4096",
        ])
        .expect("reu-load args should parse");
        match cli.command {
            Command::ReuLoad(args) => {
                assert_eq!(args.addr, 0x10000);
                assert_eq!(args.offset, 0o400);
                assert_eq!(args.size, 4096);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_stream_channel_names() {
        let cli = Cli::try_parse_from(["u64ctl", "stream-off", "--host", "h", "audio"])
            .expect("stream-off args should parse");
        match cli.command {
            Command::StreamOff(args) => {
                assert_eq!(args.channel, u64ctl_proto::StreamChannel::Audio)
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_stream_channel() {
        assert!(Cli::try_parse_from(["u64ctl", "stream-on", "--host", "h", "sid"]).is_err());
    }
}
