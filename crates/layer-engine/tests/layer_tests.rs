use layer_engine::{Layer, LayerError};
use map_types::{
    Extent, FieldDef, FieldKind, FieldValue, Geometry, LinearRing, Point, Polygon, TOPO_TOL,
};
use proptest::prelude::*;

fn schema() -> Vec<FieldDef> {
    vec![
        FieldDef::new("name", FieldKind::Text),
        FieldDef::new("population", FieldKind::Int),
    ]
}

fn values(name: &str, population: i64) -> Vec<FieldValue> {
    vec![
        FieldValue::Text {
            value: name.to_string(),
        },
        FieldValue::Int { value: population },
    ]
}

fn square_at(x: f64, y: f64, size: f64) -> Geometry {
    Geometry::Polygon(Polygon::new(LinearRing::from_points(vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ])))
}

/// Three squares at x = 0, 20, 40.
fn three_square_layer() -> Layer {
    let mut layer = Layer::new("parcels", schema());
    for (i, x) in [0.0, 20.0, 40.0].into_iter().enumerate() {
        layer
            .add_feature(square_at(x, 0.0, 10.0), values(&format!("parcel {i}"), 100))
            .unwrap();
    }
    layer
}

// ── Insertion ──────────────────────────────────────────────────────────────

#[test]
fn fids_are_assigned_sequentially() {
    let mut layer = Layer::new("test", schema());
    let a = layer.add_feature(square_at(0.0, 0.0, 1.0), values("a", 1)).unwrap();
    let b = layer.add_feature(square_at(5.0, 0.0, 1.0), values("b", 2)).unwrap();
    assert_eq!((a, b), (1, 2));
    assert_eq!(layer.len(), 2);
}

#[test]
fn add_feature_validates_value_arity() {
    let mut layer = Layer::new("test", schema());
    let result = layer.add_feature(square_at(0.0, 0.0, 1.0), Vec::new());
    assert!(matches!(
        result,
        Err(LayerError::FieldCountMismatch {
            expected: 2,
            got: 0
        })
    ));
}

#[test]
fn add_feature_validates_value_kinds() {
    let mut layer = Layer::new("test", schema());
    let wrong = vec![
        FieldValue::Int { value: 3 },
        FieldValue::Int { value: 4 },
    ];
    let result = layer.add_feature(square_at(0.0, 0.0, 1.0), wrong);
    assert!(matches!(result, Err(LayerError::FieldTypeMismatch { .. })));
}

#[test]
fn null_values_match_any_field_kind() {
    let mut layer = Layer::new("test", schema());
    let sparse = vec![FieldValue::Null, FieldValue::Null];
    assert!(layer.add_feature(square_at(0.0, 0.0, 1.0), sparse).is_ok());
}

#[test]
fn layer_extent_grows_with_insertions() {
    let layer = three_square_layer();
    let e = layer.extent().unwrap();
    assert_eq!(e.min_x, 0.0);
    assert_eq!(e.max_x, 50.0);
}

#[test]
fn attribute_access_is_bounds_checked() {
    let layer = three_square_layer();
    assert_eq!(layer.field_index("population"), Some(1));
    assert_eq!(layer.field_index("missing"), None);
    assert!(layer.value(1, 1).is_some());
    assert!(layer.value(1, 9).is_none());
    assert!(layer.value(99, 0).is_none());
}

// ── Queries ────────────────────────────────────────────────────────────────

#[test]
fn point_query_outside_the_layer_extent_short_circuits() {
    let mut layer = three_square_layer();
    assert!(layer.index_is_dirty());
    assert_eq!(layer.query_point(500.0, 500.0, TOPO_TOL), None);
    // The miss never touched (or built) the index.
    assert!(layer.index_is_dirty());
}

#[test]
fn point_query_returns_the_containing_feature() {
    let mut layer = three_square_layer();
    assert_eq!(layer.query_point(25.0, 5.0, TOPO_TOL), Some(2));
    assert_eq!(layer.query_point(15.0, 5.0, TOPO_TOL), None);
    assert!(!layer.index_is_dirty());
}

#[test]
fn rect_query_returns_each_feature_once() {
    let mut layer = three_square_layer();
    let everything = Extent::new(-10.0, -10.0, 100.0, 100.0);
    assert_eq!(layer.query_rect(&everything), vec![1, 2, 3]);

    let left_two = Extent::new(-1.0, -1.0, 31.0, 11.0);
    assert_eq!(layer.query_rect(&left_two), vec![1, 2]);
}

#[test]
fn queries_see_geometry_mutations_through_lazy_rebuild() {
    let mut layer = three_square_layer();
    assert_eq!(layer.query_point(5.0, 5.0, TOPO_TOL), Some(1));

    layer.translate_feature(1, 100.0, 0.0).unwrap();
    assert!(layer.index_is_dirty());
    assert_eq!(layer.query_point(5.0, 5.0, TOPO_TOL), None);
    assert_eq!(layer.query_point(105.0, 5.0, TOPO_TOL), Some(1));
}

#[test]
fn explicit_rebuild_bumps_the_generation() {
    let mut layer = three_square_layer();
    layer.rebuild_index();
    let first = layer.index_generation();
    layer.translate_feature(1, 1.0, 0.0).unwrap();
    layer.rebuild_index();
    assert_eq!(layer.index_generation(), first + 1);
    assert!(!layer.index_is_dirty());
}

// ── Geometry mutation ──────────────────────────────────────────────────────

#[test]
fn translate_refreshes_cached_extents() {
    let mut layer = three_square_layer();
    layer.translate_feature(3, 0.0, 50.0).unwrap();
    let fe = layer.feature(3).unwrap().extent.unwrap();
    assert_eq!(fe.min_y, 50.0);
    assert_eq!(layer.extent().unwrap().max_y, 60.0);
}

#[test]
fn rotation_round_trips_through_the_layer() {
    let mut layer = three_square_layer();
    let before = layer.feature(2).unwrap().extent.unwrap();
    let rad = 33.0_f64.to_radians();
    layer
        .rotate_feature_about(2, 25.0, 5.0, rad.sin(), rad.cos())
        .unwrap();
    layer
        .rotate_feature_about(2, 25.0, 5.0, (-rad).sin(), (-rad).cos())
        .unwrap();
    let after = layer.feature(2).unwrap().extent.unwrap();
    assert!(after.approx_eq(&before, 1e-9));
}

#[test]
fn mutating_a_deleted_feature_is_rejected() {
    let mut layer = three_square_layer();
    layer.soft_delete(2).unwrap();
    assert!(matches!(
        layer.translate_feature(2, 1.0, 1.0),
        Err(LayerError::FeatureDeleted { fid: 2 })
    ));
}

// ── Deletion ───────────────────────────────────────────────────────────────

#[test]
fn soft_deleted_features_disappear_from_queries_but_not_the_container() {
    let mut layer = three_square_layer();
    layer.soft_delete(2).unwrap();

    assert_eq!(layer.len(), 3);
    assert_eq!(layer.live_len(), 2);
    assert_eq!(layer.query_point(25.0, 5.0, TOPO_TOL), None);
    assert_eq!(layer.query_rect(&Extent::new(-10.0, -10.0, 100.0, 100.0)), vec![1, 3]);
    assert_eq!(layer.iter_live().count(), 2);

    layer.restore(2).unwrap();
    assert_eq!(layer.query_point(25.0, 5.0, TOPO_TOL), Some(2));
}

#[test]
fn soft_delete_evicts_the_selection() {
    let mut layer = three_square_layer();
    layer.select(2).unwrap();
    layer.soft_delete(2).unwrap();
    assert!(layer.selection().is_empty());
    assert!(!layer.feature(2).unwrap().selected);
    // Soft-deleted features are not selectable.
    assert!(matches!(
        layer.select(2),
        Err(LayerError::FeatureDeleted { fid: 2 })
    ));
}

#[test]
fn hard_delete_removes_and_returns_the_feature() {
    let mut layer = three_square_layer();
    let removed = layer.hard_delete(3).unwrap();
    assert_eq!(removed.fid, 3);
    assert_eq!(layer.len(), 2);
    // Extent shrank back to the surviving squares.
    assert_eq!(layer.extent().unwrap().max_x, 30.0);
    assert!(matches!(
        layer.hard_delete(3),
        Err(LayerError::FeatureNotFound { fid: 3 })
    ));
}

// ── Selection ──────────────────────────────────────────────────────────────

#[test]
fn double_select_does_not_duplicate() {
    let mut layer = three_square_layer();
    layer.select(1).unwrap();
    layer.select(1).unwrap();
    assert_eq!(layer.selection(), &[1]);
    layer.deselect(1).unwrap();
    layer.deselect(1).unwrap();
    assert!(layer.selection().is_empty());
}

#[test]
fn clear_selection_resets_every_flag() {
    let mut layer = three_square_layer();
    layer.select(1).unwrap();
    layer.select(3).unwrap();
    layer.clear_selection();
    assert!(layer.selection().is_empty());
    assert!(layer.iter().all(|f| !f.selected));
}

proptest! {
    /// Whatever the select/deselect sequence, the flag set and the selection
    /// list describe the same features.
    #[test]
    fn selection_flags_and_list_stay_consistent(ops in prop::collection::vec((1u64..=3, prop::bool::ANY), 0..40)) {
        let mut layer = three_square_layer();
        for (fid, select) in ops {
            if select {
                layer.select(fid).unwrap();
            } else {
                layer.deselect(fid).unwrap();
            }
        }
        let flagged: Vec<u64> = layer.iter().filter(|f| f.selected).map(|f| f.fid).collect();
        let mut listed: Vec<u64> = layer.selection().to_vec();
        listed.sort_unstable();
        prop_assert_eq!(flagged, listed);
    }
}
