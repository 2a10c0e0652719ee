use std::sync::Arc;

use antmsg_codec::MessageAssembler;

use crate::cmd::{resolve_entry, AsmArgs};
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_assembled, OutputFormat};

pub fn run(args: AsmArgs, format: OutputFormat) -> CliResult<i32> {
    let catalog = args.source.load()?;
    let entry = resolve_entry(&catalog, &args.message)?;

    let named: Vec<(&str, u32)> = args
        .named
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();

    let assembler = MessageAssembler::new(Arc::clone(&catalog));
    let frame = assembler
        .assemble_entry(entry, &args.values, &named)
        .map_err(|err| codec_error("assemble failed", err))?;

    tracing::info!(
        id = entry.id(),
        name = entry.name(),
        len = frame.len(),
        "assembled message"
    );
    print_assembled(entry, &frame, format);
    Ok(SUCCESS)
}
