use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Sync byte emitted at the start of every outgoing frame.
pub const SYNC: u8 = 0xA4;

/// Frame header: sync (1) + length (1) + message ID (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Header plus trailing checksum byte. Also the smallest valid frame.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + 1;

/// Largest payload a one-byte length field can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// XOR of every byte in `bytes`.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, byte| acc ^ byte)
}

/// Encode a message into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────┬──────────────────┬──────────┐
/// │ Sync     │ Length   │ Msg ID   │ Payload          │ Checksum │
/// │ 0xA4     │ (1B)     │ (1B)     │ (Length bytes)   │ (1B XOR) │
/// └──────────┴──────────┴──────────┴──────────────────┴──────────┘
/// ```
pub fn encode_frame(msg_id: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    let start = dst.len();
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_u8(SYNC);
    dst.put_u8(payload.len() as u8);
    dst.put_u8(msg_id);
    dst.put_slice(payload);
    let sum = checksum(&dst[start..]);
    dst.put_u8(sum);
    Ok(())
}

/// The three fixed header bytes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Sync marker as received. Not validated.
    pub sync: u8,
    /// Declared payload length.
    pub length: u8,
    /// Message ID.
    pub msg_id: u8,
}

impl FrameHeader {
    /// Read the header of `raw`.
    ///
    /// Fails with [`FrameError::FrameTooShort`] when `raw` cannot hold even an
    /// empty frame.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        if raw.len() < FRAME_OVERHEAD {
            return Err(FrameError::FrameTooShort { len: raw.len() });
        }
        Ok(Self {
            sync: raw[0],
            length: raw[1],
            msg_id: raw[2],
        })
    }

    /// Declared payload length as `usize`.
    pub fn payload_len(&self) -> usize {
        usize::from(self.length)
    }
}

/// A raw frame split at its declared boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameParts<'a> {
    pub header: FrameHeader,
    pub payload: &'a [u8],
    /// Checksum byte found right after the payload.
    pub received_checksum: u8,
    /// XOR of sync through the last payload byte.
    pub expected_checksum: u8,
    /// Bytes left over after the checksum byte.
    pub trailing: usize,
}

impl FrameParts<'_> {
    /// Returns true if the received checksum matches.
    pub fn checksum_ok(&self) -> bool {
        self.received_checksum == self.expected_checksum
    }

    /// Fail with [`FrameError::ChecksumMismatch`] unless the checksum matches.
    pub fn verify_checksum(&self) -> Result<()> {
        if self.checksum_ok() {
            Ok(())
        } else {
            Err(FrameError::ChecksumMismatch {
                expected: self.expected_checksum,
                received: self.received_checksum,
            })
        }
    }
}

/// Split `raw` into header, payload and checksum using the declared length.
///
/// Does not validate the checksum; see [`FrameParts::verify_checksum`].
pub fn split_frame(raw: &[u8]) -> Result<FrameParts<'_>> {
    let header = FrameHeader::parse(raw)?;
    let end = HEADER_SIZE + header.payload_len();
    if raw.len() <= end {
        return Err(FrameError::FrameTruncated {
            declared: header.payload_len(),
            available: raw.len() - FRAME_OVERHEAD,
        });
    }

    Ok(FrameParts {
        header,
        payload: &raw[HEADER_SIZE..end],
        received_checksum: raw[end],
        expected_checksum: checksum(&raw[..end]),
        trailing: raw.len() - end - 1,
    })
}

/// Configuration for stream framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    /// Bytes accepted as the start of a frame. Default: 0xA4 and 0xA5.
    pub sync_bytes: Vec<u8>,
    /// Largest declared payload accepted before resynchronising. Default: 255.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            sync_bytes: vec![SYNC, SYNC + 1],
            max_payload_size: MAX_PAYLOAD,
        }
    }
}

/// Extract the next complete raw frame from an accumulating stream buffer.
///
/// Bytes before an accepted sync byte are discarded. A sync byte followed by
/// a declared length above `config.max_payload_size` is treated as noise and
/// skipped. Returns `None` if the buffer doesn't hold a complete frame yet.
/// On success, consumes the frame bytes (sync through checksum) from `src`.
pub fn decode_frame(src: &mut BytesMut, config: &FrameConfig) -> Option<Bytes> {
    loop {
        let skip = src
            .iter()
            .position(|byte| config.sync_bytes.contains(byte))
            .unwrap_or(src.len());
        if skip > 0 {
            tracing::debug!(skipped = skip, "discarding bytes before sync");
            src.advance(skip);
        }

        if src.len() < 2 {
            return None; // Need more data
        }

        let length = usize::from(src[1]);
        if length > config.max_payload_size {
            tracing::debug!(
                length,
                max = config.max_payload_size,
                "declared length too large, resyncing"
            );
            src.advance(1);
            continue;
        }

        let total = FRAME_OVERHEAD + length;
        if src.len() < total {
            return None; // Need more data
        }

        return Some(src.split_to(total).freeze());
    }
}
