use map_types::{LinearRing, Point, Polygon};

use crate::segment::point_on_segment;

/// Ray-casting point-in-ring test.
///
/// Casts a horizontal ray from `p` toward +X past the ring's max X and
/// toggles parity on each crossing edge. A point lying on a ring edge
/// (within `tol`) counts as inside. Rings that have not been explicitly
/// closed are treated as if the closing edge existed.
pub fn point_in_ring(p: &Point, ring: &LinearRing, tol: f64) -> bool {
    let edges = ring.edges();
    if edges.is_empty() {
        return false;
    }

    for (a, b) in &edges {
        if point_on_segment(p, a, b, tol) {
            return true;
        }
    }

    let mut inside = false;
    for (a, b) in &edges {
        // A horizontal ray cannot meaningfully cross a horizontal edge.
        if (a.y - b.y).abs() <= f64::EPSILON {
            continue;
        }
        // Half-open span test: an edge counts only when its endpoints lie on
        // opposite sides of the ray, which keeps a vertex shared by two edges
        // from being counted twice.
        if (a.y > p.y) != (b.y > p.y) {
            let t = (p.y - a.y) / (b.y - a.y);
            let hit_x = a.x + t * (b.x - a.x);
            if hit_x > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Point-in-polygon with hole handling.
///
/// The hole check runs first and short-circuits: a point inside any interior
/// ring is outside the polygon, whatever the exterior says. A polygon with
/// no exterior ring contains nothing.
pub fn point_in_polygon(p: &Point, polygon: &Polygon, tol: f64) -> bool {
    for hole in &polygon.holes {
        if point_in_ring(p, hole, tol) {
            return false;
        }
    }
    match &polygon.exterior {
        Some(exterior) => point_in_ring(p, exterior, tol),
        None => false,
    }
}
