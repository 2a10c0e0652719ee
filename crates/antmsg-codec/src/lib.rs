//! Catalog-driven message assembly and disassembly.
//!
//! This is the layer callers use. Assemble a message by ID from positional
//! and named arguments, or turn received bytes back into a typed message,
//! either strictly or with lenient recovery to a raw hex rendering.

pub mod assembler;
pub mod binding;
pub mod disassembler;
pub mod error;
pub mod message;
pub mod stream;

pub use assembler::MessageAssembler;
pub use binding::bind_arguments;
pub use disassembler::DecodePolicy;
pub use error::{CodecError, Result};
pub use message::{encode_hex, ArgList, DecodedMessage};
pub use stream::MessageStream;

#[cfg(test)]
mod test_support;
