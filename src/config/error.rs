//! Generator config errors

/// Errors raised while loading, decoding, or encoding a generator config.
///
/// Each variant is terminal for the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The config file does not exist or cannot be read.
    #[error("Config file could not be read")]
    BadInputFilePath,

    /// A per-user options file was found but could not be read or parsed.
    #[error("Failed to read per-user options: {0}")]
    FailedToReadAdditionalOptionsData(String),

    /// The config document is malformed or incomplete.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The config could not be encoded.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// An additional file path was written as a label.
    #[error("Invalid additional file path: {0}")]
    InvalidAdditionalFilePath(String),
}
