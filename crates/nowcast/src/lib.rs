//! Precipitation nowcast engine.
//!
//! Turns decoded composite radar frames into point forecasts:
//!
//! - **Snapshot sets**: the frames of one refresh cycle, replaced
//!   atomically as a unit
//! - **Series extraction**: the time-ordered rates of one grid cell
//! - **Interpolation**: the rate at an arbitrary instant
//! - **Rain-event scan**: the next rain window with peak and total
//!
//! The engine owns no I/O. A poller fetches the composite container,
//! hands the bytes to [`build_snapshot_set`] and publishes the result
//! on a [`RadarService`]; queries then run purely against the published
//! set.
//!
//! # Example
//!
//! ```ignore
//! use nowcast::{build_snapshot_set, RadarService};
//! use radar_common::GeoCoordinate;
//!
//! let service = RadarService::new();
//! service.publish(build_snapshot_set(&archive_bytes)?).await?;
//!
//! let event = service
//!     .next_rain_event(GeoCoordinate::new(52.52, 13.40))
//!     .await?;
//! ```

pub mod error;
pub mod forecast;
pub mod series;
pub mod service;
pub mod snapshot;

// Re-export commonly used types at crate root
pub use error::{BuildError, QueryError, SnapshotError};
pub use forecast::{next_rain_event, RainEvent};
pub use series::{PrecipitationSample, PrecipitationSeries};
pub use service::RadarService;
pub use snapshot::{build_snapshot_set, SnapshotSet};

// Projection types surface in the service API (constructor input,
// QueryError payload); re-exported so downstream crates can use them
// without a projection dependency.
pub use projection::{OutOfDomainError, PolarStereographic};
