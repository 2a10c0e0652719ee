/// Errors that can occur while laying out, marshalling or framing messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The layout spec or slot list is malformed.
    #[error("invalid layout {spec:?}: {reason}")]
    InvalidLayout { spec: String, reason: String },

    /// The number of values does not match the layout's data slots.
    #[error("argument count mismatch (expected {expected}, got {actual})")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    /// The payload length does not match the layout's byte width.
    #[error("payload length mismatch (expected {expected} bytes, got {actual})")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    /// A value does not fit the width of its data slot.
    #[error("argument {index} value {value} does not fit in {width} byte(s)")]
    ValueOutOfRange { index: usize, value: u32, width: usize },

    /// The payload cannot be described by a one-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The buffer is smaller than the minimum frame (sync, length, id, checksum).
    #[error("frame too short ({len} bytes, need at least 4)")]
    FrameTooShort { len: usize },

    /// The declared payload length runs past the end of the buffer.
    #[error("frame truncated (declared {declared} payload bytes, {available} available)")]
    FrameTruncated { declared: usize, available: usize },

    /// The received checksum disagrees with the XOR of the frame bytes.
    #[error("checksum mismatch (expected {expected:#04x}, received {received:#04x})")]
    ChecksumMismatch { expected: u8, received: u8 },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
