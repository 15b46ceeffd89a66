use map_types::Point;

/// 2D cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o -> a -> b` turns counter-clockwise, negative clockwise,
/// near zero when the three points are collinear.
pub fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// True if `p` lies on the segment `a..b` within `tol`.
///
/// Collinearity via the cross product, betweenness via the segment's
/// bounding box (tol-padded so endpoints of steep segments are not lost to
/// rounding).
pub fn point_on_segment(p: &Point, a: &Point, b: &Point, tol: f64) -> bool {
    if cross(a, b, p).abs() > tol {
        return false;
    }
    p.x >= a.x.min(b.x) - tol
        && p.x <= a.x.max(b.x) + tol
        && p.y >= a.y.min(b.y) - tol
        && p.y <= a.y.max(b.y) + tol
}

/// True if segments `a1..a2` and `b1..b2` intersect, including collinear
/// overlap and endpoint touching.
///
/// Sign test: each segment's endpoints must straddle (or touch) the other
/// segment's supporting line, so both cross-product sign products must be
/// at most `tol`.
pub fn segments_intersect(a1: &Point, a2: &Point, b1: &Point, b2: &Point, tol: f64) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    d1 * d2 <= tol && d3 * d4 <= tol
}
