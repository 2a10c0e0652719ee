//! Binary codec for fixed-frame ANT radio messages.
//!
//! antmsg assembles typed messages into wire-exact frames and disassembles
//! received bytes back into checksum-validated messages, driven by a catalog
//! of message layouts.
//!
//! # Crate Structure
//!
//! - [`frame`] — Field layouts, payload marshalling, sync/checksum framing
//! - [`catalog`] — ID-keyed message definitions
//! - [`codec`] — Assembly, strict/lenient disassembly, message streams

/// Re-export frame types.
pub mod frame {
    pub use antmsg_frame::*;
}

/// Re-export catalog types.
pub mod catalog {
    pub use antmsg_catalog::*;
}

/// Re-export codec types.
pub mod codec {
    pub use antmsg_codec::*;
}
