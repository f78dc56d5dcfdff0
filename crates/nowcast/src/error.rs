//! Error types for the nowcast engine.

use projection::OutOfDomainError;
use radolan_parser::FormatError;
use thiserror::Error;

/// Errors that can occur while answering a point query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The coordinate projects outside the composite grid.
    #[error(transparent)]
    OutOfDomain(#[from] OutOfDomainError),

    /// No snapshot set has been published yet.
    #[error("no radar data available: no refresh has completed yet")]
    DataUnavailable,
}

/// Errors that can occur while assembling or publishing a snapshot set.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Two frames carry the same capture time.
    #[error("duplicate frame timestamp {timestamp} in snapshot set")]
    DuplicateTimestamp { timestamp: chrono::DateTime<chrono::Utc> },

    /// A grid extent does not match the one expected of it: frames of
    /// one set must agree with each other, and a published set must
    /// live on the serving grid.
    #[error("grid extent {actual_cols}x{actual_rows} does not match the expected {expected_cols}x{expected_rows}")]
    ExtentMismatch {
        expected_cols: usize,
        expected_rows: usize,
        actual_cols: usize,
        actual_rows: usize,
    },
}

/// Errors that can occur while building a snapshot set from a raw
/// composite container.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The container or one of its members is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The decoded frames are inconsistent with each other.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The container unpacked cleanly but held no frames.
    #[error("composite container holds no radar frames")]
    EmptyContainer,
}
