//! Error types for the faceseek library.

use thiserror::Error;

/// All errors that can occur in the faceseek library.
#[derive(Error, Debug)]
pub enum FaceError {
    /// Invalid magic bytes in a record header.
    #[error("Invalid magic bytes in record header")]
    InvalidMagic,

    /// Unsupported record format version.
    #[error("Unsupported record format version: {0}")]
    UnsupportedVersion(u32),

    /// Embedding dimension mismatch.
    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Embedding with zero components.
    #[error("Embedding must have at least one component")]
    EmptyEmbedding,

    /// Identity name unusable as a storage key.
    #[error("Invalid identity name: {0:?}")]
    InvalidName(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Compression error.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Record is empty or truncated.
    #[error("Record is empty or truncated")]
    Truncated,

    /// Corrupt record data.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Video stream could not be opened or read.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Face extractor failure.
    #[error("Extraction error: {0}")]
    Extract(String),
}

/// Convenience result type for faceseek operations.
pub type FaceResult<T> = Result<T, FaceError>;
