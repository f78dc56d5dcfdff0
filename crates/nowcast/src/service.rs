//! Shared snapshot state for concurrent queries.
//!
//! One writer publishes freshly built snapshot sets; any number of
//! readers query the current one. Publication swaps a reference behind
//! a read/write lock, so a reader observes either the complete previous
//! set or the complete new one, never a mixture. Queries clone the
//! reference out of the lock and run on it without holding the lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use projection::PolarStereographic;
use radar_common::GeoCoordinate;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{QueryError, SnapshotError};
use crate::forecast::{next_rain_event, RainEvent};
use crate::series::PrecipitationSeries;
use crate::snapshot::SnapshotSet;

/// Query front of the nowcast engine.
///
/// Holds the projection and the currently published snapshot set. All
/// query methods resolve the coordinate once, then work purely on the
/// set they grabbed; a refresh landing mid-query does not affect them.
pub struct RadarService {
    projector: PolarStereographic,
    snapshots: RwLock<Option<Arc<SnapshotSet>>>,
}

impl RadarService {
    /// Create a service answering queries on the DE1200 composite grid.
    ///
    /// Starts without data; queries fail with `DataUnavailable` until
    /// the first [`publish`](Self::publish).
    pub fn new() -> Self {
        Self::with_projector(PolarStereographic::de1200())
    }

    /// Create a service answering queries on the given projector's grid.
    pub fn with_projector(projector: PolarStereographic) -> Self {
        Self {
            projector,
            snapshots: RwLock::new(None),
        }
    }

    /// Publish a freshly built snapshot set, replacing the previous one.
    ///
    /// The set must live on the service's grid: a set on any other
    /// extent is rejected and the published set stays in place. Cell
    /// indices resolved by the projector therefore always land inside
    /// the frames a query reads. Empty sets carry no extent and pass.
    pub async fn publish(&self, set: SnapshotSet) -> Result<(), SnapshotError> {
        if let Some(extent) = set.extent() {
            let expected = self.projector.extent;
            if extent != expected {
                return Err(SnapshotError::ExtentMismatch {
                    expected_cols: expected.cols,
                    expected_rows: expected.rows,
                    actual_cols: extent.cols,
                    actual_rows: extent.rows,
                });
            }
        }

        let set = Arc::new(set);
        let frames = set.len();
        let mut guard = self.snapshots.write().await;
        *guard = Some(set);
        drop(guard);
        info!(frames, "published snapshot set");
        Ok(())
    }

    /// The currently published snapshot set, if any.
    pub async fn current(&self) -> Option<Arc<SnapshotSet>> {
        self.snapshots.read().await.clone()
    }

    /// Whether a snapshot set has been published yet.
    pub async fn is_ready(&self) -> bool {
        self.current().await.is_some()
    }

    async fn current_or_unavailable(&self) -> Result<Arc<SnapshotSet>, QueryError> {
        self.current().await.ok_or(QueryError::DataUnavailable)
    }

    /// Time-ordered precipitation series at a coordinate.
    pub async fn precipitation_series(
        &self,
        coord: GeoCoordinate,
    ) -> Result<PrecipitationSeries, QueryError> {
        let set = self.current_or_unavailable().await?;
        let cell = self.projector.grid_index(coord)?;
        set.series_at(cell)
    }

    /// Interpolated precipitation rate at a coordinate and instant, in mm/h.
    pub async fn value_at(
        &self,
        coord: GeoCoordinate,
        instant: DateTime<Utc>,
    ) -> Result<f64, QueryError> {
        let series = self.precipitation_series(coord).await?;
        Ok(series.rate_at(instant))
    }

    /// The next rain event at a coordinate.
    pub async fn next_rain_event(&self, coord: GeoCoordinate) -> Result<RainEvent, QueryError> {
        let series = self.precipitation_series(coord).await?;
        Ok(next_rain_event(&series))
    }
}

impl Default for RadarService {
    fn default() -> Self {
        Self::new()
    }
}
