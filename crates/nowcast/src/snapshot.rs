//! Snapshot sets: the frames of one refresh cycle.
//!
//! A refresh decodes a whole composite container into frames and seals
//! them into a [`SnapshotSet`]. The set is immutable once built; the
//! next refresh replaces it wholesale instead of mutating it, so
//! readers never observe a half-updated grid.

use chrono::{DateTime, Utc};
use radar_common::{GridExtent, GridIndex};
use radolan_parser::{decode_composite, RadarFrame};
use tracing::debug;

use crate::error::{BuildError, QueryError, SnapshotError};
use crate::series::{PrecipitationSample, PrecipitationSeries};

/// The frames decoded from one composite container, ascending by
/// capture time.
#[derive(Debug, Clone)]
pub struct SnapshotSet {
    frames: Vec<RadarFrame>,
}

impl SnapshotSet {
    /// Seal decoded frames into a snapshot set.
    ///
    /// Frames are sorted by capture time here; container member order
    /// is not trusted to be chronological. Fails if two frames share a
    /// timestamp or disagree on grid extent.
    pub fn from_frames(mut frames: Vec<RadarFrame>) -> Result<Self, SnapshotError> {
        frames.sort_by_key(|frame| frame.timestamp());

        if let Some(first) = frames.first() {
            let extent = first.extent();
            for frame in &frames {
                if frame.extent() != extent {
                    return Err(SnapshotError::ExtentMismatch {
                        expected_cols: extent.cols,
                        expected_rows: extent.rows,
                        actual_cols: frame.extent().cols,
                        actual_rows: frame.extent().rows,
                    });
                }
            }
            for pair in frames.windows(2) {
                if pair[0].timestamp() == pair[1].timestamp() {
                    return Err(SnapshotError::DuplicateTimestamp {
                        timestamp: pair[0].timestamp(),
                    });
                }
            }
        }

        Ok(Self { frames })
    }

    /// Number of frames in the set.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the set holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Grid extent shared by every frame, absent when the set is empty.
    pub fn extent(&self) -> Option<GridExtent> {
        self.frames.first().map(|frame| frame.extent())
    }

    /// The frames in ascending capture-time order.
    pub fn frames(&self) -> &[RadarFrame] {
        &self.frames
    }

    /// First and last capture times, the span the set can answer for.
    pub fn horizon(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => Some((first.timestamp(), last.timestamp())),
            _ => None,
        }
    }

    /// Extract the precipitation-rate series at one grid cell.
    ///
    /// One sample per frame, in frame order. The index must lie inside
    /// the set's extent. Fails when the set holds no frames.
    pub fn series_at(&self, index: GridIndex) -> Result<PrecipitationSeries, QueryError> {
        if self.frames.is_empty() {
            return Err(QueryError::DataUnavailable);
        }

        let samples = self
            .frames
            .iter()
            .map(|frame| PrecipitationSample {
                timestamp: frame.timestamp(),
                rate_mm_h: frame.rate_at(index),
            })
            .collect();

        Ok(PrecipitationSeries::new(samples))
    }
}

/// Build a snapshot set from the raw bytes of a composite container.
///
/// This is the whole refresh pipeline below the network: decompress,
/// decode every member, sort and seal. A container holding no frames
/// counts as a failure like any other; nothing is ever half-built, so
/// the caller keeps serving its previous set.
pub fn build_snapshot_set(archive_bytes: &[u8]) -> Result<SnapshotSet, BuildError> {
    let frames = decode_composite(archive_bytes)?;
    if frames.is_empty() {
        return Err(BuildError::EmptyContainer);
    }

    let set = SnapshotSet::from_frames(frames)?;

    debug!(frames = set.len(), "built snapshot set");

    Ok(set)
}
