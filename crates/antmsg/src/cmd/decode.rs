use std::fs::File;
use std::io::{self, BufReader, Read};

use antmsg_codec::{DecodePolicy, MessageAssembler};
use antmsg_frame::{FrameError, FrameReader};

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, frame_error, io_error, CliResult, SUCCESS};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let assembler = MessageAssembler::new(args.source.load()?);
    let policy = if args.lenient {
        DecodePolicy::Lenient
    } else {
        DecodePolicy::Strict
    };

    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("open {}", path.display()), err))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut reader = FrameReader::new(input);

    let mut printed = 0usize;
    loop {
        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }

        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(frame_error("read failed", err)),
        };

        let msg = assembler
            .disassemble_with(&frame, policy)
            .map_err(|err| codec_error("disassemble failed", err))?;
        print_message(&msg, format);
        printed = printed.saturating_add(1);
    }

    tracing::debug!(frames = printed, "decode finished");
    Ok(SUCCESS)
}
