use antmsg_frame::{split_frame, unpack, FrameHeader};

use crate::assembler::MessageAssembler;
use crate::error::{CodecError, Result};
use crate::message::{encode_hex, ArgList, DecodedMessage};

/// How disassembly treats malformed or unrecognised frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Every failure is returned to the caller.
    #[default]
    Strict,
    /// Checksum failures are ignored; truncated frames, unknown IDs and
    /// payload shape mismatches become [`DecodedMessage::Fallback`].
    Lenient,
}

impl MessageAssembler {
    /// Disassemble `raw` strictly.
    pub fn disassemble(&self, raw: &[u8]) -> Result<DecodedMessage> {
        self.disassemble_with(raw, DecodePolicy::Strict)
    }

    /// Disassemble `raw` leniently.
    ///
    /// Only fails for buffers shorter than the minimum frame.
    pub fn disassemble_lenient(&self, raw: &[u8]) -> Result<DecodedMessage> {
        self.disassemble_with(raw, DecodePolicy::Lenient)
    }

    /// Disassemble one complete frame under `policy`.
    pub fn disassemble_with(&self, raw: &[u8], policy: DecodePolicy) -> Result<DecodedMessage> {
        // Too short to carry a header: nothing to recover in either mode.
        let header = FrameHeader::parse(raw)?;

        let parts = match split_frame(raw) {
            Ok(parts) => parts,
            Err(err) => return recover(policy, raw, header, err.into()),
        };

        if let Err(err) = parts.verify_checksum() {
            match policy {
                DecodePolicy::Strict => return Err(err.into()),
                DecodePolicy::Lenient => {
                    tracing::warn!(
                        msg_id = header.msg_id,
                        error = %err,
                        "ignoring checksum mismatch"
                    );
                }
            }
        }

        let entry = match self.catalog().lookup(header.msg_id) {
            Ok(entry) => entry,
            Err(err) => return recover(policy, raw, header, err.into()),
        };

        if parts.trailing > 0 {
            let err = CodecError::TrailingBytes {
                extra: parts.trailing,
            };
            return recover(policy, raw, header, err);
        }

        let values = match unpack(entry.layout(), parts.payload) {
            Ok(values) => values,
            Err(err) => return recover(policy, raw, header, err.into()),
        };

        let args = match entry.shared_field_names() {
            Some(names) => ArgList::named(values, names),
            None => ArgList::positional(values),
        };

        Ok(DecodedMessage::Decoded {
            sync: header.sync,
            msg_id: header.msg_id,
            name: entry.name().to_string(),
            args,
        })
    }
}

fn recover(
    policy: DecodePolicy,
    raw: &[u8],
    header: FrameHeader,
    err: CodecError,
) -> Result<DecodedMessage> {
    match policy {
        DecodePolicy::Strict => Err(err),
        DecodePolicy::Lenient => {
            tracing::debug!(
                msg_id = header.msg_id,
                len = raw.len(),
                error = %err,
                "falling back to raw hex"
            );
            Ok(DecodedMessage::Fallback {
                sync: header.sync,
                msg_id: header.msg_id,
                raw_hex: encode_hex(raw),
            })
        }
    }
}
