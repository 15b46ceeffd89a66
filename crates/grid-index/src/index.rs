use std::collections::BTreeSet;

use map_types::{Extent, Geometry, EQ_TOL};
use spatial_ops::{geometry_intersects_rect, point_hits_geometry};
use tracing::debug;

use crate::cell::GridCell;

/// Hard cap on grid resolution per dimension.
const MAX_CELLS_PER_AXIS: usize = 64;

/// Target mean occupancy for the degenerate (coincident features) fallback.
const FALLBACK_FEATURES_PER_CELL: usize = 16;

/// Cells are sized at this multiple of the mean feature footprint, balancing
/// index granularity against how many cells a single feature registers into.
const CELL_SIZE_FACTOR: f64 = 3.0;

/// A rows × cols grid of cells over a layer extent.
///
/// Built from a snapshot of `(slot, geometry)` entries; the slot is the
/// feature's index in the owning layer's feature vector. Queries take a
/// resolver closure back into that vector, so the index never holds feature
/// data and cannot dangle — at worst, a stale index resolves to geometry
/// that has moved, which is exactly what [`GridIndex::generation`] lets the
/// owner detect.
#[derive(Debug, Clone)]
pub struct GridIndex {
    rows: usize,
    cols: usize,
    extent: Extent,
    cells: Vec<GridCell>,
    generation: u64,
}

impl GridIndex {
    /// An index with no cells. All queries on it return nothing.
    pub fn empty(generation: u64) -> Self {
        Self {
            rows: 0,
            cols: 0,
            extent: Extent::new(0.0, 0.0, 0.0, 0.0),
            cells: Vec::new(),
            generation,
        }
    }

    /// Build an index over `extent` from live feature entries.
    ///
    /// Cell sizing: 3 × the mean feature-extent footprint; if that
    /// underflows to zero (all features are coincident points), fall back to
    /// a square power-of-two resolution sized for a mean occupancy of at
    /// most 16, capped at 64 × 64 either way.
    pub fn build(extent: Extent, entries: &[(usize, &Geometry)], generation: u64) -> Self {
        let mut sum_w = 0.0;
        let mut sum_h = 0.0;
        let mut counted = 0usize;
        let mut extents = Vec::with_capacity(entries.len());
        for (slot, geometry) in entries {
            match geometry.extent() {
                Some(e) => {
                    sum_w += e.width();
                    sum_h += e.height();
                    counted += 1;
                    extents.push(Some((*slot, e)));
                }
                None => extents.push(None),
            }
        }
        if counted == 0 {
            return Self::empty(generation);
        }

        let cell_w = sum_w / counted as f64 * CELL_SIZE_FACTOR;
        let cell_h = sum_h / counted as f64 * CELL_SIZE_FACTOR;

        let (rows, cols) = if cell_w <= EQ_TOL || cell_h <= EQ_TOL {
            let side = fallback_resolution(counted);
            (side, side)
        } else {
            let cols = clamp_axis((extent.width() / cell_w).round());
            let rows = clamp_axis((extent.height() / cell_h).round());
            (rows, cols)
        };

        let step_x = extent.width() / cols as f64;
        let step_y = extent.height() / rows as f64;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let x0 = extent.min_x + col as f64 * step_x;
                let y0 = extent.min_y + row as f64 * step_y;
                // Snap the last row/column to the layer extent so rounding
                // cannot leave a sliver uncovered.
                let x1 = if col + 1 == cols {
                    extent.max_x
                } else {
                    extent.min_x + (col + 1) as f64 * step_x
                };
                let y1 = if row + 1 == rows {
                    extent.max_y
                } else {
                    extent.min_y + (row + 1) as f64 * step_y
                };
                let cell_extent = Extent::new(x0, y0, x1, y1);

                let mut cell = GridCell::new(row * cols + col, cell_extent);
                for (entry, recorded) in entries.iter().zip(&extents) {
                    let Some((slot, feature_extent)) = recorded else {
                        continue;
                    };
                    if !feature_extent.intersects(&cell_extent) {
                        continue;
                    }
                    if geometry_intersects_rect(entry.1, &cell_extent) {
                        cell.slots.push(*slot);
                    }
                }
                cells.push(cell);
            }
        }

        debug!(
            features = counted,
            rows, cols, generation, "grid index built"
        );

        Self {
            rows,
            cols,
            extent,
            cells,
            generation,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Build counter assigned by the owner; bumped on every rebuild so stale
    /// indexes are detectable.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Find the first feature whose geometry contains (or comes within `tol`
    /// of) the query point.
    ///
    /// Locates the single cell containing the point by linear scan, then
    /// exact-tests that cell's features in slot registration order.
    pub fn query_point<'g, F>(&self, x: f64, y: f64, tol: f64, resolve: F) -> Option<usize>
    where
        F: Fn(usize) -> Option<&'g Geometry>,
    {
        let p = map_types::Point::new(x, y);
        let cell = self
            .cells
            .iter()
            .find(|c| c.extent.contains_point(x, y))?;
        for &slot in &cell.slots {
            let Some(geometry) = resolve(slot) else {
                continue;
            };
            if point_hits_geometry(&p, geometry, tol) {
                return Some(slot);
            }
        }
        None
    }

    /// All features whose geometry intersects the query rectangle,
    /// de-duplicated by slot identity regardless of geometry kind and
    /// returned in ascending slot order.
    pub fn query_rect<'g, F>(&self, rect: &Extent, resolve: F) -> Vec<usize>
    where
        F: Fn(usize) -> Option<&'g Geometry>,
    {
        let mut tested = BTreeSet::new();
        let mut hits = BTreeSet::new();
        for cell in &self.cells {
            if !cell.extent.intersects(rect) {
                continue;
            }
            for &slot in &cell.slots {
                if !tested.insert(slot) {
                    continue;
                }
                let Some(geometry) = resolve(slot) else {
                    continue;
                };
                if geometry_intersects_rect(geometry, rect) {
                    hits.insert(slot);
                }
            }
        }
        hits.into_iter().collect()
    }
}

fn clamp_axis(v: f64) -> usize {
    if v < 1.0 {
        1
    } else if v > MAX_CELLS_PER_AXIS as f64 {
        MAX_CELLS_PER_AXIS
    } else {
        v as usize
    }
}

fn fallback_resolution(count: usize) -> usize {
    let mut side = 1usize;
    while side < MAX_CELLS_PER_AXIS && count > side * side * FALLBACK_FEATURES_PER_CELL {
        side *= 2;
    }
    side
}
