//! Error types for composite decoding.

use thiserror::Error;

/// Errors raised while decoding a composite container or one of its
/// members. All variants are deterministic for a given input; a decode
/// failure abandons the whole refresh attempt.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The container could not be read as a bzip2-compressed tar archive.
    #[error("unreadable composite container: {0}")]
    Archive(String),

    /// A member name does not carry the expected trailing timestamp.
    #[error("member '{name}' has an invalid name: {reason}")]
    MemberName { name: String, reason: String },

    /// The embedded capture time could not be parsed.
    #[error("member '{name}' has an invalid timestamp: {reason}")]
    Timestamp { name: String, reason: String },

    /// A member payload contains no ETX header terminator.
    #[error("member '{name}' has no ETX header terminator")]
    MissingEtx { name: String },

    /// The grid buffer after the header has the wrong byte length.
    #[error("member '{name}' grid buffer is {actual} bytes, expected {expected}")]
    PayloadLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A code buffer does not match its grid extent.
    #[error("grid has {actual} codes, expected {expected}")]
    CellCount { expected: usize, actual: usize },
}
