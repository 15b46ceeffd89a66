use approx::assert_abs_diff_eq;
use map_types::{
    Extent, Geometry, GeometryCollection, GeometryKind, LineString, LinearRing, MultiPoint, Point,
    Polygon, EQ_TOL,
};
use proptest::prelude::*;

fn ring(points: &[(f64, f64)]) -> LinearRing {
    LinearRing::from_points(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

fn line(points: &[(f64, f64)]) -> LineString {
    LineString::from_points(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

// ── Extent ─────────────────────────────────────────────────────────────────

#[test]
fn extent_normalizes_swapped_corners() {
    let e = Extent::new(10.0, 5.0, -2.0, -8.0);
    assert_eq!(e.min_x, -2.0);
    assert_eq!(e.max_x, 10.0);
    assert_eq!(e.min_y, -8.0);
    assert_eq!(e.max_y, 5.0);
}

#[test]
fn extent_intersect_of_touching_boxes_is_degenerate() {
    let a = Extent::new(0.0, 0.0, 5.0, 5.0);
    let b = Extent::new(5.0, 0.0, 10.0, 5.0);
    let overlap = a.intersect(&b).unwrap();
    assert_eq!(overlap.min_x, 5.0);
    assert_eq!(overlap.max_x, 5.0);
}

#[test]
fn extent_contains_is_inclusive_of_boundary() {
    let e = Extent::new(0.0, 0.0, 10.0, 10.0);
    assert!(e.contains_point(0.0, 5.0));
    assert!(e.contains_point(10.0, 10.0));
    assert!(!e.contains_point(10.0 + 1e-9, 5.0));
}

proptest! {
    #[test]
    fn extent_merge_is_commutative(
        ax in -1e6..1e6f64, ay in -1e6..1e6f64, aw in 0.0..1e3f64, ah in 0.0..1e3f64,
        bx in -1e6..1e6f64, by in -1e6..1e6f64, bw in 0.0..1e3f64, bh in 0.0..1e3f64,
    ) {
        let a = Extent::new(ax, ay, ax + aw, ay + ah);
        let b = Extent::new(bx, by, bx + bw, by + bh);
        prop_assert!(a.merge(&b).approx_eq(&b.merge(&a), EQ_TOL));
    }

    #[test]
    fn extent_merge_is_associative(
        ax in -1e6..1e6f64, ay in -1e6..1e6f64,
        bx in -1e6..1e6f64, by in -1e6..1e6f64,
        cx in -1e6..1e6f64, cy in -1e6..1e6f64,
    ) {
        let a = Extent::new(ax, ay, ax + 10.0, ay + 10.0);
        let b = Extent::new(bx, by, bx + 10.0, by + 10.0);
        let c = Extent::new(cx, cy, cx + 10.0, cy + 10.0);
        let left = a.merge(&b).merge(&c);
        let right = a.merge(&b.merge(&c));
        prop_assert!(left.approx_eq(&right, EQ_TOL));
    }
}

// ── Geometry extents ───────────────────────────────────────────────────────

#[test]
fn point_extent_is_degenerate() {
    let g = Geometry::Point(Point::new(3.0, -4.0));
    let e = g.extent().unwrap();
    assert_eq!(e.min_x, e.max_x);
    assert_eq!(e.min_y, e.max_y);
    assert_eq!(e.min_x, 3.0);
}

#[test]
fn polygon_extent_unions_holes_defensively() {
    // Hole placed OUTSIDE the exterior: malformed, but the extent must still
    // cover it rather than assume containment.
    let poly = Polygon::with_holes(
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
        vec![ring(&[(20.0, 20.0), (25.0, 20.0), (25.0, 25.0), (20.0, 25.0)])],
    );
    let e = Geometry::Polygon(poly).extent().unwrap();
    assert_eq!(e.max_x, 25.0);
    assert_eq!(e.max_y, 25.0);
}

#[test]
fn polygon_without_exterior_has_no_extent() {
    let poly = Polygon {
        exterior: None,
        holes: vec![ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])],
    };
    // Holes alone still produce a (defensive) extent...
    assert!(Geometry::Polygon(poly).extent().is_some());
    // ...but a fully empty polygon produces none.
    assert!(Geometry::Polygon(Polygon::default()).extent().is_none());
}

#[test]
fn empty_collection_has_no_extent() {
    let g = Geometry::Collection(GeometryCollection::default());
    assert!(g.is_empty());
    assert!(g.extent().is_none());
}

#[test]
fn point_count_folds_over_the_tree() {
    let g = Geometry::Collection(GeometryCollection {
        members: vec![
            Geometry::Point(Point::new(0.0, 0.0)),
            Geometry::LineString(line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])),
            Geometry::Polygon(Polygon::with_holes(
                ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
                vec![ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)])],
            )),
        ],
    });
    assert_eq!(g.point_count(), 1 + 3 + 4 + 3);
    assert_eq!(g.kind(), GeometryKind::Collection);
}

// ── Clone independence ─────────────────────────────────────────────────────

#[test]
fn clone_shares_no_storage_with_the_original() {
    let original = Geometry::MultiPoint(MultiPoint {
        points: vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
    });
    let mut copy = original.clone();
    copy.translate(100.0, 100.0);

    let e = original.extent().unwrap();
    assert_eq!(e.max_x, 2.0);
    assert!(copy
        .extent()
        .unwrap()
        .approx_eq(&Extent::new(101.0, 101.0, 102.0, 102.0), EQ_TOL));
}

#[test]
fn clone_preserves_extent() {
    let g = Geometry::LineString(line(&[(0.0, 0.0), (7.0, 3.0), (-2.0, 5.0)]));
    assert!(g.clone().extent().unwrap().approx_eq(&g.extent().unwrap(), EQ_TOL));
}

// ── Affine ops ─────────────────────────────────────────────────────────────

#[test]
fn translate_is_recursive() {
    let mut g = Geometry::Polygon(Polygon::with_holes(
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
        vec![ring(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)])],
    ));
    g.translate(5.0, -5.0);
    let e = g.extent().unwrap();
    assert!(e.approx_eq(&Extent::new(5.0, -5.0, 15.0, 5.0), EQ_TOL));
}

#[test]
fn rotate_uses_the_clockwise_convention() {
    // 90 degrees about the origin sends (1, 0) to (0, -1) under the editor's
    // clockwise formula.
    let mut g = Geometry::Point(Point::new(1.0, 0.0));
    let rad = 90.0_f64.to_radians();
    g.rotate(0.0, 0.0, rad.sin(), rad.cos());
    let Geometry::Point(p) = g else { unreachable!() };
    assert_abs_diff_eq!(p.x, 0.0, epsilon = EQ_TOL);
    assert_abs_diff_eq!(p.y, -1.0, epsilon = EQ_TOL);
}

proptest! {
    #[test]
    fn rotation_round_trips_about_a_fixed_center(
        x in -1e3..1e3f64, y in -1e3..1e3f64,
        cx in -1e3..1e3f64, cy in -1e3..1e3f64,
        degrees in -360.0..360.0f64,
    ) {
        let mut g = Geometry::Point(Point::new(x, y));
        let rad = degrees.to_radians();
        g.rotate(cx, cy, rad.sin(), rad.cos());
        g.rotate(cx, cy, (-rad).sin(), (-rad).cos());
        let Geometry::Point(p) = g else { unreachable!() };
        prop_assert!((p.x - x).abs() < 1e-6);
        prop_assert!((p.y - y).abs() < 1e-6);
    }
}

#[test]
fn swap_xy_transposes_the_extent() {
    let mut g = Geometry::LineString(line(&[(0.0, 2.0), (10.0, 4.0)]));
    g.swap_xy();
    let e = g.extent().unwrap();
    assert!(e.approx_eq(&Extent::new(2.0, 0.0, 4.0, 10.0), EQ_TOL));
}

// ── Rings ──────────────────────────────────────────────────────────────────

#[test]
fn close_appends_the_first_vertex_once() {
    let mut r = ring(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
    assert!(!r.is_closed(EQ_TOL));
    r.close();
    assert!(r.is_closed(EQ_TOL));
    assert_eq!(r.len(), 4);
    // Closing again is a no-op.
    r.close();
    assert_eq!(r.len(), 4);
}

#[test]
fn open_ring_edges_include_the_implicit_closing_edge() {
    let r = ring(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
    assert_eq!(r.edges().len(), 3);
    let mut closed = r.clone();
    closed.close();
    assert_eq!(closed.edges().len(), 3);
}
