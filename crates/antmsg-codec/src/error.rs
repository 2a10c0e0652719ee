/// Errors that can occur while assembling or disassembling messages.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A named argument does not match any field of the message.
    #[error("message {message}: unknown argument {argument:?}")]
    UnknownArgument { message: String, argument: String },

    /// A field received more than one value.
    #[error("message {message}: argument {argument:?} given more than once")]
    DuplicateArgument { message: String, argument: String },

    /// Bytes follow the checksum byte of an otherwise complete frame.
    #[error("{extra} trailing byte(s) after checksum")]
    TrailingBytes { extra: usize },

    /// Layout, marshalling or framing error.
    #[error("frame error: {0}")]
    Frame(#[from] antmsg_frame::FrameError),

    /// Catalog lookup error.
    #[error("catalog error: {0}")]
    Catalog(#[from] antmsg_catalog::CatalogError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
