//! Polar stereographic projection.
//!
//! The DWD composite radar products place their grid on a polar
//! stereographic plane tangent to the Earth at the north pole, with true
//! scale at 60°N and the 10°E meridian pointing straight down the grid.
//!
//! The projection parameters include:
//! - Earth radius: the spherical radius used by the composite (km)
//! - Standard latitude: latitude of true scale (60°N for all DWD composites)
//! - Reference longitude: the meridian aligned with the grid's y axis
//! - Origin offsets: shift of the grid origin on the plane (km)
//!
//! Plane coordinates come out in kilometers; the composite grids use 1 km
//! cells, so truncating a plane coordinate yields a cell index directly.

use std::f64::consts::PI;

use radar_common::{GeoCoordinate, GridExtent, GridIndex, DE1200_EXTENT};
use thiserror::Error;

/// A coordinate projected outside the composite grid.
///
/// Carries the plane coordinates the projection produced so callers can
/// log how far off the grid the request landed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("coordinate falls outside the composite grid (plane x={x_km:.3} km, y={y_km:.3} km)")]
pub struct OutOfDomainError {
    /// Plane x coordinate in kilometers.
    pub x_km: f64,
    /// Plane y coordinate in kilometers.
    pub y_km: f64,
}

/// Polar stereographic projection parameters.
///
/// These parameters define the projection from geographic (lat/lon) to
/// plane kilometers and on to grid cell indices.
#[derive(Debug, Clone)]
pub struct PolarStereographic {
    /// Earth radius in kilometers
    pub earth_radius_km: f64,
    /// Latitude of true scale in degrees
    pub standard_latitude: f64,
    /// Meridian aligned with the negative y axis, in degrees
    pub reference_longitude: f64,
    /// Grid origin offset along x, in kilometers
    pub x_offset_km: f64,
    /// Grid origin offset along y, in kilometers
    pub y_offset_km: f64,
    /// Extent of the target grid
    pub extent: GridExtent,
}

impl PolarStereographic {
    /// Create the projection for the DE1200 composite grid.
    ///
    /// DE1200 uses:
    /// - Earth radius: 6370.04 km
    /// - Standard latitude: 60°N
    /// - Reference meridian: 10°E
    /// - Origin offsets: (543.4622, 4808.645) km
    /// - Grid: 1100 x 1200 cells, 1 km spacing
    pub fn de1200() -> Self {
        Self {
            earth_radius_km: 6370.04,
            standard_latitude: 60.0,
            reference_longitude: 10.0,
            x_offset_km: 543.4622,
            y_offset_km: 4808.645,
            extent: DE1200_EXTENT,
        }
    }

    /// Project a geographic coordinate onto the stereographic plane.
    ///
    /// Returns (x, y) in kilometers relative to the grid origin. The
    /// result may lie outside the grid; use [`grid_index`] to resolve a
    /// cell with bounds checking.
    ///
    /// [`grid_index`]: PolarStereographic::grid_index
    pub fn project(&self, coord: GeoCoordinate) -> (f64, f64) {
        let to_rad = PI / 180.0;
        let lat = coord.latitude * to_rad;
        let dlon = (coord.longitude - self.reference_longitude) * to_rad;
        let lat0 = self.standard_latitude * to_rad;

        // Stereographic scale factor for this latitude
        let k = self.earth_radius_km * (1.0 + lat0.sin()) / (1.0 + lat.sin());

        let x_km = k * lat.cos() * dlon.sin() + self.x_offset_km;
        let y_km = -k * lat.cos() * dlon.cos() + self.y_offset_km;

        (x_km, y_km)
    }

    /// Resolve a geographic coordinate to a grid cell.
    pub fn grid_index(&self, coord: GeoCoordinate) -> Result<GridIndex, OutOfDomainError> {
        let (x_km, y_km) = self.project(coord);
        plane_to_cell(x_km, y_km, self.extent)
    }

    /// Check whether a geographic coordinate lies on the grid.
    pub fn contains(&self, coord: GeoCoordinate) -> bool {
        self.grid_index(coord).is_ok()
    }
}

/// Convert plane kilometers to a grid cell index.
///
/// Truncates toward zero, matching the composite's published cell
/// assignment. Truncation (not floor) matters on the negative side of the
/// origin: -0.5 km truncates to cell 0 and is on the grid, while floor
/// would push it to -1 and off it.
pub fn plane_to_cell(
    x_km: f64,
    y_km: f64,
    extent: GridExtent,
) -> Result<GridIndex, OutOfDomainError> {
    let col = x_km.trunc();
    let row = y_km.trunc();

    if col < 0.0 || row < 0.0 || col >= extent.cols as f64 || row >= extent.rows as f64 {
        return Err(OutOfDomainError { x_km, y_km });
    }

    Ok(GridIndex::new(col as usize, row as usize))
}
