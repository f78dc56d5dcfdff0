//! Coordinate reference system transformations.
//!
//! Implements the composite mosaic's map projection from scratch without
//! external dependencies.

pub mod stereographic;

pub use stereographic::{plane_to_cell, OutOfDomainError, PolarStereographic};
