use tracing::info;
use u64ctl_proto::{decode_text_with, MacroPolicy};

use crate::cmd::KeybArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};

pub fn run(args: KeybArgs) -> CliResult<i32> {
    let policy = if args.strict {
        MacroPolicy::Strict
    } else {
        MacroPolicy::Lenient
    };
    let keys = decode_text_with(&args.text, policy)
        .map_err(|err| protocol_error("invalid macro text", err))?;
    info!(text = %args.text, bytes = keys.len(), "typing");

    let mut writer = args.connect.open()?;
    writer
        .keyboard_inject(&keys)
        .map_err(|err| protocol_error("keyboard inject failed", err))?;

    println!("typed '{}'", args.text);
    Ok(SUCCESS)
}
