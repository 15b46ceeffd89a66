use serde::{Deserialize, Serialize};

use crate::extent::Extent;

/// A 2D coordinate pair. Compared with epsilon tolerance, never exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate-wise equality within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    /// The degenerate extent at this point.
    pub fn extent(&self) -> Extent {
        Extent::from_point(self)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate about `(cx, cy)`.
    ///
    /// This is the clockwise sign convention the editor has always used;
    /// callers pass a negated angle for counter-clockwise rotation.
    pub fn rotate(&mut self, cx: f64, cy: f64, sin_a: f64, cos_a: f64) {
        let dx = self.x - cx;
        let dy = self.y - cy;
        self.x = dx * cos_a + dy * sin_a + cx;
        self.y = dy * cos_a - dx * sin_a + cy;
    }

    pub fn swap_xy(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }
}
