use antmsg_codec::{DecodePolicy, MessageAssembler};

use crate::cmd::DisasmArgs;
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DisasmArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.hex)?;
    let assembler = MessageAssembler::new(args.source.load()?);
    let policy = if args.lenient {
        DecodePolicy::Lenient
    } else {
        DecodePolicy::Strict
    };

    let msg = assembler
        .disassemble_with(&raw, policy)
        .map_err(|err| codec_error("disassemble failed", err))?;
    if msg.is_fallback() {
        tracing::warn!(msg_id = msg.msg_id(), "frame not decoded, showing raw bytes");
    }

    print_message(&msg, format);
    Ok(SUCCESS)
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let input = input.trim();
    let input = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let digits: Vec<u8> = input
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace() && *byte != b':' && *byte != b'-')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "hex input has an odd number of digits"));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair)
                .map_err(|_| CliError::new(USAGE, "hex input is not ASCII"))?;
            u8::from_str_radix(text, 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {text}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_separators() {
        assert_eq!(
            parse_hex("A4 03 42:04-03 40 a2").unwrap(),
            vec![0xA4, 0x03, 0x42, 0x04, 0x03, 0x40, 0xA2]
        );
        assert_eq!(parse_hex("0xa5014b04eb").unwrap(), vec![0xA5, 0x01, 0x4B, 0x04, 0xEB]);
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert_eq!(parse_hex("a40").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
    }
}
