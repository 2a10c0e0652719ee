use antmsg_frame::FrameError;

/// Errors that can occur while building or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No entry is registered for the message ID.
    #[error("unknown message id {0:#04x}")]
    UnknownMessage(u8),

    /// No entry is registered under the message name.
    #[error("unknown message name {0:?}")]
    UnknownName(String),

    /// Two definitions share a message ID.
    #[error("duplicate message id {id:#04x} ({existing} and {name})")]
    DuplicateId {
        id: u8,
        existing: String,
        name: String,
    },

    /// The field name list does not match the layout's data slots.
    #[error("message {name}: {actual} field names for {expected} data fields")]
    FieldNameCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A field name appears twice within one message.
    #[error("message {name}: duplicate field name {field:?}")]
    DuplicateFieldName { name: String, field: String },

    /// The layout spec could not be parsed.
    #[error("layout error: {0}")]
    Layout(#[from] FrameError),

    /// The definition file could not be loaded.
    #[error("failed to load definitions: {0}")]
    LoadFailed(String),

    /// The definition file is not valid JSON for the expected shape.
    #[error("definitions are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
