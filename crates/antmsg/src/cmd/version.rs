use antmsg_frame::{MAX_PAYLOAD, SYNC};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("antmsg {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: antmsg");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "build_target: {}",
        option_env!("ANTMSG_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("sync: {SYNC:#04x}");
    println!("max_payload: {MAX_PAYLOAD}");

    Ok(SUCCESS)
}
