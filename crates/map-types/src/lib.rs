//! Shared value types for the vector GIS core: points, extents, the geometry
//! model, and layer field definitions.
//!
//! Geometry is a tagged union — every consumer pattern-matches, nothing
//! downcasts. Coordinates are plain projected or geographic `f64` pairs; no
//! reprojection happens anywhere in this workspace.

pub mod extent;
pub mod fields;
pub mod geometry;
pub mod point;

pub use extent::*;
pub use fields::*;
pub use geometry::*;
pub use point::*;

/// Tolerance for pure coordinate equality.
pub const EQ_TOL: f64 = 1e-6;

/// Tolerance for topological tests (on-segment, in-ring, intersection).
pub const TOPO_TOL: f64 = 1e-3;
