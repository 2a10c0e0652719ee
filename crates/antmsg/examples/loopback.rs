//! Assemble a few ANT messages into an in-memory wire and decode them back.
//!
//! Run with:
//!   cargo run --example loopback

use std::io::Cursor;
use std::sync::Arc;

use antmsg::catalog::{Catalog, MessageDef};
use antmsg::codec::{encode_hex, CodecError, DecodePolicy, MessageAssembler, MessageStream};
use antmsg::frame::FrameError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let outbound = [
        MessageDef::new(
            "ANT_AssignChannel",
            0x42,
            "BBB",
            Some(&["channelNumber", "channelType", "networkNumber"]),
        ),
        MessageDef::new("ANT_ResetSystem", 0x4A, "x", Some(&[])),
        MessageDef::new("ANT_OpenChannel", 0x4B, "B", None),
    ];
    let catalog = Arc::new(Catalog::new(&[&outbound])?);
    let assembler = MessageAssembler::new(catalog);

    let mut sender = MessageStream::new(Cursor::new(Vec::new()), Vec::new(), assembler.clone());
    sender.send(0x4A, &[], &[])?;
    sender.send(0x42, &[0], &[("channelType", 0x40), ("networkNumber", 1)])?;
    sender.send(0x4B, &[0], &[])?;
    let (_, mut wire) = sender.into_inner();
    eprintln!("wire: {}", encode_hex(&wire));

    // A frame the catalog does not know, recovered as raw hex.
    wire.extend_from_slice(&[0xA4, 0x01, 0x00, 0x00, 0xA5]);

    let mut receiver = MessageStream::new(Cursor::new(wire), Vec::new(), assembler);
    loop {
        match receiver.recv(DecodePolicy::Lenient) {
            Ok(msg) => match (msg.name(), msg.args(), msg.raw_hex()) {
                (Some(name), Some(args), _) => println!("{name} {:?}", args.values()),
                (_, _, Some(raw)) => println!("unknown {:#04x}: {raw}", msg.msg_id()),
                _ => {}
            },
            Err(CodecError::Frame(FrameError::ConnectionClosed)) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
