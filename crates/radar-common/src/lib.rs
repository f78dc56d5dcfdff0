//! Common types shared across the radar-nowcast workspace.
//!
//! Keeps the geographic and grid primitives in one place so the parser,
//! the projection and the nowcast engine all agree on what a coordinate
//! and a grid cell are.

pub mod geo;
pub mod grid;

pub use geo::GeoCoordinate;
pub use grid::{GridExtent, GridIndex, DE1200_EXTENT};
