use std::path::{Path, PathBuf};
use std::sync::Arc;

use antmsg_catalog::{parse_message_id, Catalog, CatalogConfig, CatalogEntry, DuplicateIdPolicy};
use clap::{Args, Subcommand};

use crate::exit::{catalog_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod asm;
pub mod catalog;
pub mod decode;
pub mod disasm;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a message into a wire frame.
    Asm(AsmArgs),
    /// Disassemble one hex-encoded frame.
    Disasm(DisasmArgs),
    /// Decode every frame in a binary stream.
    Decode(DecodeArgs),
    /// List catalog entries.
    Catalog(CatalogArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Asm(args) => asm::run(args, format),
        Command::Disasm(args) => disasm::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Catalog(args) => catalog::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CatalogSource {
    /// JSON message definition file.
    #[arg(long, short = 'C', env = "ANTMSG_CATALOG", value_name = "FILE")]
    pub catalog: PathBuf,
    /// Let later definitions replace earlier ones with the same ID.
    #[arg(long)]
    pub last_wins: bool,
}

impl CatalogSource {
    pub fn load(&self) -> CliResult<Arc<Catalog>> {
        load_catalog(&self.catalog, self.last_wins)
    }
}

fn load_catalog(path: &Path, last_wins: bool) -> CliResult<Arc<Catalog>> {
    let config = CatalogConfig {
        duplicate_ids: if last_wins {
            DuplicateIdPolicy::LastWins
        } else {
            DuplicateIdPolicy::Reject
        },
        ..CatalogConfig::default()
    };
    let catalog = Catalog::from_file_with_config(path, config)
        .map_err(|err| catalog_error("catalog load failed", err))?;
    tracing::debug!(
        path = %path.display(),
        entries = catalog.len(),
        "catalog loaded"
    );
    Ok(Arc::new(catalog))
}

#[derive(Args, Debug)]
pub struct AsmArgs {
    #[command(flatten)]
    pub source: CatalogSource,
    /// Message ID (decimal or 0x-prefixed hex) or catalog name.
    pub message: String,
    /// Positional field values, in field order.
    #[arg(value_parser = parse_value)]
    pub values: Vec<u32>,
    /// Named field value (repeatable).
    #[arg(long = "arg", short = 'a', value_name = "NAME=VALUE", value_parser = parse_named_value)]
    pub named: Vec<(String, u32)>,
}

#[derive(Args, Debug)]
pub struct DisasmArgs {
    #[command(flatten)]
    pub source: CatalogSource,
    /// Frame bytes as hex. Spaces, ':' and '-' separators are ignored.
    pub hex: String,
    /// Recover from bad checksums, unknown IDs and shape mismatches.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: CatalogSource,
    /// Binary capture to read. Default: stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Recover from bad checksums, unknown IDs and shape mismatches.
    #[arg(long)]
    pub lenient: bool,
    /// Stop after N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub source: CatalogSource,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Resolve a message argument to its catalog entry, trying numeric forms
/// first. Unknown IDs and names are both usage errors.
pub fn resolve_entry<'a>(catalog: &'a Catalog, message: &str) -> CliResult<&'a CatalogEntry> {
    let found = match parse_message_id(message) {
        Some(id) => catalog.lookup(id),
        None => catalog.lookup_name(message),
    };
    found.map_err(|err| CliError::new(USAGE, format!("unknown message: {err}")))
}

pub fn parse_value(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid value: {input}"))
}

pub fn parse_named_value(input: &str) -> Result<(String, u32), String> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {input}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing argument name in {input}"));
    }
    Ok((name.to_string(), parse_value(value)?))
}
