//! Invariant checks returning pass/fail verdicts.
//!
//! Every failure message carries expected vs actual plus the context string,
//! and the layer report can be appended by the caller for full diagnostics.

use layer_engine::Layer;
use map_types::{Extent, Point};
use spatial_ops::point_hits_geometry;

use crate::helpers::HarnessError;

/// Assert two extents agree bound-wise within `tol`.
pub fn assert_extent_close(
    actual: &Extent,
    expected: &Extent,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if actual.approx_eq(expected, tol) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] extent mismatch: expected ({:.4}, {:.4})-({:.4}, {:.4}), got ({:.4}, {:.4})-({:.4}, {:.4}) (tol={})",
                ctx,
                expected.min_x,
                expected.min_y,
                expected.max_x,
                expected.max_y,
                actual.min_x,
                actual.min_y,
                actual.max_x,
                actual.max_y,
                tol,
            ),
        })
    }
}

/// Assert the selection invariant: the set of features with the selected
/// flag equals the layer's selection list.
pub fn assert_selection_consistent(layer: &Layer, ctx: &str) -> Result<(), HarnessError> {
    let mut flagged: Vec<u64> = layer
        .iter()
        .filter(|f| f.selected)
        .map(|f| f.fid)
        .collect();
    let mut listed: Vec<u64> = layer.selection().to_vec();
    flagged.sort_unstable();
    listed.sort_unstable();

    if flagged == listed {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] selection drift: flagged {:?} vs listed {:?}",
                ctx, flagged, listed,
            ),
        })
    }
}

/// Oracle check: the indexed point query must agree with a brute-force scan
/// of every live feature in storage order.
pub fn assert_point_query_matches_scan(
    layer: &mut Layer,
    x: f64,
    y: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let p = Point::new(x, y);
    let scanned = layer
        .iter_live()
        .find(|f| point_hits_geometry(&p, &f.geometry, tol))
        .map(|f| f.fid);
    let indexed = layer.query_point(x, y, tol);

    if indexed == scanned {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] point query disagreement at ({}, {}): index says {:?}, scan says {:?}",
                ctx, x, y, indexed, scanned,
            ),
        })
    }
}

/// Assert grid completeness: a rectangle query over the whole layer extent
/// reports every live feature exactly once.
pub fn assert_query_complete(layer: &mut Layer, ctx: &str) -> Result<(), HarnessError> {
    let mut expected: Vec<u64> = layer.iter_live().map(|f| f.fid).collect();
    expected.sort_unstable();

    let Some(extent) = layer.extent() else {
        if expected.is_empty() {
            return Ok(());
        }
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{}] layer has live features but no extent", ctx),
        });
    };

    let hits = layer.query_rect(&extent);
    let mut got = hits.clone();
    got.sort_unstable();
    got.dedup();
    if got.len() != hits.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{}] duplicate fids in rect query: {:?}", ctx, hits),
        });
    }
    if got == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] incomplete rect query: expected {:?}, got {:?}",
                ctx, expected, got,
            ),
        })
    }
}
