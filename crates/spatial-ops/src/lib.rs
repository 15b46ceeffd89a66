//! Geometric predicates over the [`map_types`] geometry model.
//!
//! Every selection, search, and identify operation in the editor bottoms out
//! here. All tests are tolerance-based: coordinates are floating point and
//! exact equality is unreliable, so callers pass an explicit tolerance
//! (topological tests default to [`map_types::TOPO_TOL`]).

pub mod hit;
pub mod rect;
pub mod ring;
pub mod segment;

pub use hit::point_hits_geometry;
pub use rect::{
    geometry_intersects_rect, line_string_intersects_rect, polygon_intersects_rect,
    ring_intersects_rect,
};
pub use ring::{point_in_polygon, point_in_ring};
pub use segment::{cross, point_on_segment, segments_intersect};
