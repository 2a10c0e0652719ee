use std::io::{Read, Write};

use antmsg_frame::{FrameConfig, FrameReader, FrameWriter};

use crate::assembler::MessageAssembler;
use crate::disassembler::DecodePolicy;
use crate::error::Result;
use crate::message::DecodedMessage;

/// Message-level view of a byte stream pair (for example the two halves of a
/// serial port handle).
pub struct MessageStream<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    assembler: MessageAssembler,
}

impl<R: Read, W: Write> MessageStream<R, W> {
    /// Create a message stream with default framing configuration.
    pub fn new(reader: R, writer: W, assembler: MessageAssembler) -> Self {
        Self::with_config(reader, writer, assembler, FrameConfig::default())
    }

    /// Create a message stream with explicit framing configuration.
    pub fn with_config(
        reader: R,
        writer: W,
        assembler: MessageAssembler,
        config: FrameConfig,
    ) -> Self {
        Self {
            reader: FrameReader::with_config(reader, config),
            writer: FrameWriter::new(writer),
            assembler,
        }
    }

    /// Assemble message `id` and write it (blocking).
    pub fn send(&mut self, id: u8, positional: &[u32], named: &[(&str, u32)]) -> Result<()> {
        let frame = self.assembler.assemble(id, positional, named)?;
        self.writer.write_frame(&frame)?;
        Ok(())
    }

    /// Read the next frame and disassemble it under `policy` (blocking).
    pub fn recv(&mut self, policy: DecodePolicy) -> Result<DecodedMessage> {
        let frame = self.reader.read_frame()?;
        self.assembler.disassemble_with(&frame, policy)
    }

    pub fn assembler(&self) -> &MessageAssembler {
        &self.assembler
    }

    /// Consume the stream and return the inner reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}
