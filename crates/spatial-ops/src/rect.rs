use map_types::{Extent, Geometry, LineString, LinearRing, Point, Polygon, TOPO_TOL};

use crate::ring::point_in_polygon;
use crate::segment::segments_intersect;

/// True if any vertex of `line` lies inside `rect`, or any segment of `line`
/// crosses one of the rectangle's four edges.
pub fn line_string_intersects_rect(line: &LineString, rect: &Extent) -> bool {
    if line
        .points
        .iter()
        .any(|p| rect.contains_point(p.x, p.y))
    {
        return true;
    }
    line.segments()
        .any(|(a, b)| segment_crosses_rect_edge(&a, &b, rect))
}

/// Ring-versus-rectangle test, with the ring treated as a closed line string
/// (the implicit closing edge participates).
pub fn ring_intersects_rect(ring: &LinearRing, rect: &Extent) -> bool {
    if ring
        .points
        .iter()
        .any(|p| rect.contains_point(p.x, p.y))
    {
        return true;
    }
    ring.edges()
        .iter()
        .any(|(a, b)| segment_crosses_rect_edge(a, b, rect))
}

/// Polygon-versus-rectangle test.
///
/// Intersects when the exterior ring or any hole ring meets the rectangle,
/// or when a rectangle corner lies inside the polygon — the corner arm
/// covers a rectangle wholly interior to a large polygon, which the ring
/// edges alone cannot see. This is still an approximation, not exact
/// clipping: hole-ring contact alone is accepted as an intersection.
pub fn polygon_intersects_rect(polygon: &Polygon, rect: &Extent) -> bool {
    let Some(exterior) = &polygon.exterior else {
        return false;
    };
    if ring_intersects_rect(exterior, rect) {
        return true;
    }
    if polygon.holes.iter().any(|h| ring_intersects_rect(h, rect)) {
        return true;
    }
    rect.corners()
        .iter()
        .any(|c| point_in_polygon(c, polygon, TOPO_TOL))
}

/// Kind-dispatched geometry-versus-rectangle test, the exact check behind
/// grid cell registration and rectangle queries.
pub fn geometry_intersects_rect(geometry: &Geometry, rect: &Extent) -> bool {
    match geometry {
        Geometry::Point(p) => rect.contains_point(p.x, p.y),
        Geometry::LineString(l) => line_string_intersects_rect(l, rect),
        Geometry::LinearRing(r) => ring_intersects_rect(r, rect),
        Geometry::Polygon(p) => polygon_intersects_rect(p, rect),
        Geometry::MultiPoint(m) => m.points.iter().any(|p| rect.contains_point(p.x, p.y)),
        Geometry::MultiLineString(m) => {
            m.lines.iter().any(|l| line_string_intersects_rect(l, rect))
        }
        Geometry::MultiPolygon(m) => m
            .polygons
            .iter()
            .any(|p| polygon_intersects_rect(p, rect)),
        Geometry::Collection(c) => c
            .members
            .iter()
            .any(|g| geometry_intersects_rect(g, rect)),
    }
}

fn segment_crosses_rect_edge(a: &Point, b: &Point, rect: &Extent) -> bool {
    let corners = rect.corners();
    (0..4).any(|i| {
        let e1 = &corners[i];
        let e2 = &corners[(i + 1) % 4];
        segments_intersect(a, b, e1, e2, TOPO_TOL)
    })
}
