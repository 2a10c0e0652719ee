use std::io::{IsTerminal, Write};

use antmsg_catalog::{Catalog, CatalogEntry};
use antmsg_codec::{encode_hex, DecodedMessage};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    value: u32,
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    sync: u8,
    msg_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<&'a [u32]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldOutput<'a>>,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_hex: Option<&'a str>,
}

impl<'a> From<&'a DecodedMessage> for MessageOutput<'a> {
    fn from(msg: &'a DecodedMessage) -> Self {
        let fields = msg
            .args()
            .map(|args| {
                args.iter_named()
                    .map(|(name, value)| FieldOutput { name, value })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            sync: msg.sync(),
            msg_id: msg.msg_id(),
            name: msg.name(),
            args: msg.args().map(|args| args.values()),
            fields,
            fallback: msg.is_fallback(),
            raw_hex: msg.raw_hex(),
        }
    }
}

pub fn print_message(msg: &DecodedMessage, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&MessageOutput::from(msg)),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SYNC", "ID", "NAME", "ARGS"])
                .add_row(vec![
                    format!("{:#04x}", msg.sync()),
                    format!("{:#04x}", msg.msg_id()),
                    msg.name().unwrap_or("<unknown>").to_string(),
                    describe_args(msg),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "sync={:#04x} id={:#04x} name={} {}",
                msg.sync(),
                msg.msg_id(),
                msg.name().unwrap_or("<unknown>"),
                describe_args(msg)
            );
        }
        OutputFormat::Raw => match msg {
            DecodedMessage::Decoded { args, .. } => {
                let values: Vec<String> = args.iter().map(|value| value.to_string()).collect();
                println!("{}", values.join(" "));
            }
            DecodedMessage::Fallback { raw_hex, .. } => println!("{raw_hex}"),
        },
    }
}

#[derive(Serialize)]
struct AssembledOutput<'a> {
    msg_id: u8,
    name: &'a str,
    len: usize,
    frame_hex: String,
}

pub fn print_assembled(entry: &CatalogEntry, frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&AssembledOutput {
            msg_id: entry.id(),
            name: entry.name(),
            len: frame.len(),
            frame_hex: encode_hex(frame),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "LEN", "FRAME"])
                .add_row(vec![
                    format!("{:#04x}", entry.id()),
                    entry.name().to_string(),
                    frame.len().to_string(),
                    encode_hex(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{} {}", entry.name(), encode_hex(frame)),
        OutputFormat::Raw => print_raw(frame),
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    id: u8,
    name: &'a str,
    layout: &'a str,
    width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [String]>,
}

pub fn print_catalog(catalog: &Catalog, format: OutputFormat) {
    let entries = catalog.entries();
    match format {
        OutputFormat::Json => {
            let out: Vec<EntryOutput<'_>> = entries
                .iter()
                .map(|entry| EntryOutput {
                    id: entry.id(),
                    name: entry.name(),
                    layout: entry.layout().spec(),
                    width: entry.layout().byte_width(),
                    fields: entry.field_names(),
                })
                .collect();
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "LAYOUT", "WIDTH", "FIELDS"]);
            for entry in &entries {
                table.add_row(vec![
                    format!("{:#04x}", entry.id()),
                    entry.name().to_string(),
                    entry.layout().spec().to_string(),
                    entry.layout().byte_width().to_string(),
                    describe_fields(entry),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in &entries {
                println!(
                    "{:#04x} {} layout={} fields={}",
                    entry.id(),
                    entry.name(),
                    entry.layout(),
                    describe_fields(entry)
                );
            }
        }
        OutputFormat::Raw => {
            for entry in &entries {
                println!("{}", entry.name());
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn describe_args(msg: &DecodedMessage) -> String {
    match msg {
        DecodedMessage::Decoded { args, .. } if args.names().is_some() => args
            .iter_named()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" "),
        DecodedMessage::Decoded { args, .. } => args
            .iter()
            .enumerate()
            .map(|(index, value)| format!("[{index}]={value}"))
            .collect::<Vec<_>>()
            .join(" "),
        DecodedMessage::Fallback { raw_hex, .. } => format!("raw={raw_hex}"),
    }
}

fn describe_fields(entry: &CatalogEntry) -> String {
    match entry.field_names() {
        Some(fields) if fields.is_empty() => "-".to_string(),
        Some(fields) => fields.join(","),
        None => format!("<{} unnamed>", entry.layout().arg_count()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use antmsg_codec::ArgList;

    use super::*;

    #[test]
    fn json_output_for_decoded_message() {
        let names: Arc<[String]> = vec!["channelNumber".to_string()].into();
        let msg = DecodedMessage::Decoded {
            sync: 0xA4,
            msg_id: 0x4C,
            name: "ANT_CloseChannel".to_string(),
            args: ArgList::named(vec![2], names),
        };

        let json = serde_json::to_string(&MessageOutput::from(&msg)).unwrap();
        assert!(json.contains("\"msg_id\":76"));
        assert!(json.contains("\"fields\":[{\"name\":\"channelNumber\",\"value\":2}]"));
        assert!(json.contains("\"fallback\":false"));
        assert!(!json.contains("raw_hex"));
    }

    #[test]
    fn json_output_for_fallback() {
        let msg = DecodedMessage::Fallback {
            sync: 0xA4,
            msg_id: 0,
            raw_hex: "a4010000a5".to_string(),
        };

        let json = serde_json::to_string(&MessageOutput::from(&msg)).unwrap();
        assert!(json.contains("\"raw_hex\":\"a4010000a5\""));
        assert!(json.contains("\"fallback\":true"));
        assert!(!json.contains("\"args\""));
    }

    #[test]
    fn describe_positional_args() {
        let msg = DecodedMessage::Decoded {
            sync: 0xA5,
            msg_id: 0x4B,
            name: "ANT_OpenChannel".to_string(),
            args: ArgList::positional(vec![4]),
        };
        assert_eq!(describe_args(&msg), "[0]=4");
    }
}
