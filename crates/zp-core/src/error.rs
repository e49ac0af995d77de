use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZappyError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),
    #[error("Truncated stream: {0}")]
    TruncatedStream(String),
    #[error("Unknown token: 0x{0:02x}")]
    UnknownToken(u8),
    #[error("Contraction lookup [{size_class}]:{index} not found")]
    InvalidContraction { size_class: u8, index: u8 },
    #[error("Invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("Internal encoding error: {0}")]
    InternalEncoding(String),
    #[error("Deflate error: {0}")]
    Deflate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ZappyError {
    /// Errors caused by the content of a payload being decoded, as opposed to
    /// configuration mistakes or encoder bugs.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64(_)
                | Self::TruncatedStream(_)
                | Self::UnknownToken(_)
                | Self::InvalidContraction { .. }
                | Self::InvalidUtf8 { .. }
                | Self::Deflate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ZappyError>;
