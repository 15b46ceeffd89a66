use map_types::{Geometry, Point};

use crate::ring::{point_in_polygon, point_in_ring};
use crate::segment::point_on_segment;

/// Kind-dispatched point hit test, the exact check behind point queries.
///
/// Point features match within `tol` of their coordinates, line features
/// within `tol` of any segment, polygon features by containment (the
/// tolerance only widens edge handling there).
pub fn point_hits_geometry(p: &Point, geometry: &Geometry, tol: f64) -> bool {
    match geometry {
        Geometry::Point(q) => q.approx_eq(p, tol),
        Geometry::LineString(l) => l.segments().any(|(a, b)| point_on_segment(p, &a, &b, tol)),
        Geometry::LinearRing(r) => point_in_ring(p, r, tol),
        Geometry::Polygon(poly) => point_in_polygon(p, poly, tol),
        Geometry::MultiPoint(m) => m.points.iter().any(|q| q.approx_eq(p, tol)),
        Geometry::MultiLineString(m) => m
            .lines
            .iter()
            .any(|l| l.segments().any(|(a, b)| point_on_segment(p, &a, &b, tol))),
        Geometry::MultiPolygon(m) => m.polygons.iter().any(|poly| point_in_polygon(p, poly, tol)),
        Geometry::Collection(c) => c.members.iter().any(|g| point_hits_geometry(p, g, tol)),
    }
}
