//! ID-keyed catalog of message definitions.
//!
//! A catalog is built once from one or more definition lists (typically the
//! outbound commands a host sends and the inbound events a radio emits) and is
//! read-only afterwards. Each entry binds a message ID to a name, a payload
//! [`FieldLayout`](antmsg_frame::FieldLayout) and, optionally, field names.

pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;

pub use catalog::{Catalog, CatalogEntry};
pub use config::{CatalogConfig, DuplicateIdPolicy};
pub use definition::{parse_message_id, DefinitionFile, MessageDef};
pub use error::{CatalogError, Result};
