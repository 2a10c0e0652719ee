//! Fixed-frame message layouts and wire framing for ANT-style serial radios.
//!
//! Every message on the wire is framed as:
//! - A 1-byte sync marker (0xA4 when sent by this crate)
//! - A 1-byte payload length
//! - A 1-byte message ID
//! - The payload, packed according to a [`FieldLayout`]
//! - A 1-byte XOR checksum over everything before it
//!
//! This crate knows nothing about message names or catalogs; it only deals in
//! slot widths, payload bytes and frame boundaries.

pub mod codec;
pub mod error;
pub mod layout;
pub mod marshal;
pub mod reader;
pub mod writer;

pub use codec::{
    checksum, decode_frame, encode_frame, split_frame, FrameConfig, FrameHeader, FrameParts,
    FRAME_OVERHEAD, HEADER_SIZE, MAX_PAYLOAD, SYNC,
};
pub use error::{FrameError, Result};
pub use layout::{ByteOrder, FieldLayout, Slot};
pub use marshal::{pack, unpack};
pub use reader::FrameReader;
pub use writer::FrameWriter;
