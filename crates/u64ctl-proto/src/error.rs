/// Errors that can occur while encoding commands or decoding macro text.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The payload exceeds what the command's length field can represent.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A decoded header carries a command id this protocol does not define.
    #[error("unknown command id 0x{id:04X}")]
    UnknownCommand { id: u16 },

    /// An argument failed runtime validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unbalanced or unterminated braces in `{name}` macro text.
    #[error("malformed macro text at byte {index}: {detail}")]
    MalformedMacro { index: usize, detail: &'static str },

    /// A macro name not present in the control table (strict mode only).
    #[error("unknown control macro {{{name}}}")]
    UnknownMacro { name: String },

    /// Macro text contains a byte outside the ASCII range.
    #[error("text is not ASCII (byte at index {index})")]
    NonAsciiText { index: usize },

    /// An I/O error occurred while transmitting a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was written.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
