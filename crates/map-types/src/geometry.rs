use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::point::Point;
use crate::EQ_TOL;

/// Discriminant tag for [`Geometry`]. Used where a consumer only needs to
/// branch on the kind (index registration, reports) without borrowing the
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    Collection,
}

/// A feature geometry. Every variant owns its coordinate data outright, so a
/// derived `Clone` is a deep copy with no shared mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    Collection(GeometryCollection),
}

/// An ordered, open sequence of vertices. Insertion order is drawing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineString {
    pub points: Vec<Point>,
}

/// A line string with a closure invariant: once [`close`](LinearRing::close)
/// has run, the first and last vertices coincide within tolerance. Closure is
/// never applied automatically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRing {
    pub points: Vec<Point>,
}

/// One exterior ring plus zero or more interior (hole) rings. Rings are owned
/// by the polygon and destroyed with it. A polygon without an exterior has no
/// extent and intersects nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Option<LinearRing>,
    pub holes: Vec<LinearRing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiPoint {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiLineString {
    pub lines: Vec<LineString>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

/// A heterogeneous, ordered collection of sub-geometries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeometryCollection {
    pub members: Vec<Geometry>,
}

// ── LineString ─────────────────────────────────────────────────────────────

impl LineString {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Insert at `index`, clamped to the end of the sequence.
    pub fn insert(&mut self, index: usize, p: Point) {
        let clamped = index.min(self.points.len());
        self.points.insert(clamped, p);
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Overwrite the vertex at `index`. Returns false if out of range.
    pub fn set_point(&mut self, index: usize, p: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }

    /// Consecutive vertex pairs, in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn extent(&self) -> Option<Extent> {
        extent_of_points(&self.points)
    }
}

// ── LinearRing ─────────────────────────────────────────────────────────────

impl LinearRing {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if the first and last vertices coincide within `tol`.
    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.approx_eq(last, tol),
            _ => false,
        }
    }

    /// Append a copy of the first vertex if the ring is not already closed.
    pub fn close(&mut self) {
        if self.points.len() >= 2 && !self.is_closed(EQ_TOL) {
            let first = self.points[0];
            self.points.push(first);
        }
    }

    /// Ring edges, including the implicit closing edge when the ring has not
    /// been explicitly closed.
    pub fn edges(&self) -> Vec<(Point, Point)> {
        let mut out: Vec<(Point, Point)> =
            self.points.windows(2).map(|w| (w[0], w[1])).collect();
        if self.points.len() >= 3 && !self.is_closed(EQ_TOL) {
            out.push((self.points[self.points.len() - 1], self.points[0]));
        }
        out
    }

    pub fn extent(&self) -> Option<Extent> {
        extent_of_points(&self.points)
    }
}

impl From<LineString> for LinearRing {
    fn from(line: LineString) -> Self {
        Self {
            points: line.points,
        }
    }
}

// ── Polygon ────────────────────────────────────────────────────────────────

impl Polygon {
    pub fn new(exterior: LinearRing) -> Self {
        Self {
            exterior: Some(exterior),
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self {
            exterior: Some(exterior),
            holes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.as_ref().map_or(true, |r| r.is_empty())
    }

    /// Union of all ring extents. Holes are unioned too rather than assumed
    /// to sit inside the exterior; malformed input must not shrink the box.
    pub fn extent(&self) -> Option<Extent> {
        let mut acc: Option<Extent> = self.exterior.as_ref().and_then(|r| r.extent());
        for hole in &self.holes {
            if let Some(he) = hole.extent() {
                acc = Some(match acc {
                    Some(e) => e.merge(&he),
                    None => he,
                });
            }
        }
        acc
    }
}

// ── Geometry ───────────────────────────────────────────────────────────────

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::LineString(_) => GeometryKind::LineString,
            Self::LinearRing(_) => GeometryKind::LinearRing,
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPoint(_) => GeometryKind::MultiPoint,
            Self::MultiLineString(_) => GeometryKind::MultiLineString,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Self::Collection(_) => GeometryKind::Collection,
        }
    }

    /// Total vertex count across the whole tree.
    pub fn point_count(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::LineString(l) => l.points.len(),
            Self::LinearRing(r) => r.points.len(),
            Self::Polygon(p) => polygon_point_count(p),
            Self::MultiPoint(m) => m.points.len(),
            Self::MultiLineString(m) => m.lines.iter().map(|l| l.points.len()).sum(),
            Self::MultiPolygon(m) => m.polygons.iter().map(polygon_point_count).sum(),
            Self::Collection(c) => c.members.iter().map(Self::point_count).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::LineString(l) => l.is_empty(),
            Self::LinearRing(r) => r.is_empty(),
            Self::Polygon(p) => p.is_empty(),
            Self::MultiPoint(m) => m.points.is_empty(),
            Self::MultiLineString(m) => m.lines.iter().all(LineString::is_empty),
            Self::MultiPolygon(m) => m.polygons.iter().all(Polygon::is_empty),
            Self::Collection(c) => c.members.iter().all(Self::is_empty),
        }
    }

    /// Bounding extent, computed on demand by folding over the coordinate
    /// tree. `None` for empty geometry; never cached here.
    pub fn extent(&self) -> Option<Extent> {
        match self {
            Self::Point(p) => Some(p.extent()),
            Self::LineString(l) => l.extent(),
            Self::LinearRing(r) => r.extent(),
            Self::Polygon(p) => p.extent(),
            Self::MultiPoint(m) => extent_of_points(&m.points),
            Self::MultiLineString(m) => merge_extents(m.lines.iter().map(LineString::extent)),
            Self::MultiPolygon(m) => merge_extents(m.polygons.iter().map(Polygon::extent)),
            Self::Collection(c) => merge_extents(c.members.iter().map(Self::extent)),
        }
    }

    /// Translate every coordinate in place, recursively.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.for_each_point(&mut |p| p.translate(dx, dy));
    }

    /// Rotate every coordinate about `(cx, cy)` with the editor's clockwise
    /// sign convention (see [`Point::rotate`]).
    pub fn rotate(&mut self, cx: f64, cy: f64, sin_a: f64, cos_a: f64) {
        self.for_each_point(&mut |p| p.rotate(cx, cy, sin_a, cos_a));
    }

    /// Rotate by an angle in degrees about the geometry's own extent center.
    /// Empty geometry is left untouched.
    pub fn rotate_deg(&mut self, degrees: f64) {
        let Some(extent) = self.extent() else {
            return;
        };
        let center = extent.center();
        let rad = degrees * std::f64::consts::PI / 180.0;
        self.rotate(center.x, center.y, rad.sin(), rad.cos());
    }

    /// Swap the x and y axes of every coordinate.
    pub fn swap_xy(&mut self) {
        self.for_each_point(&mut |p| p.swap_xy());
    }

    fn for_each_point(&mut self, f: &mut impl FnMut(&mut Point)) {
        match self {
            Self::Point(p) => f(p),
            Self::LineString(l) => l.points.iter_mut().for_each(&mut *f),
            Self::LinearRing(r) => r.points.iter_mut().for_each(&mut *f),
            Self::Polygon(p) => {
                if let Some(ext) = &mut p.exterior {
                    ext.points.iter_mut().for_each(&mut *f);
                }
                for hole in &mut p.holes {
                    hole.points.iter_mut().for_each(&mut *f);
                }
            }
            Self::MultiPoint(m) => m.points.iter_mut().for_each(&mut *f),
            Self::MultiLineString(m) => {
                for line in &mut m.lines {
                    line.points.iter_mut().for_each(&mut *f);
                }
            }
            Self::MultiPolygon(m) => {
                for poly in &mut m.polygons {
                    if let Some(ext) = &mut poly.exterior {
                        ext.points.iter_mut().for_each(&mut *f);
                    }
                    for hole in &mut poly.holes {
                        hole.points.iter_mut().for_each(&mut *f);
                    }
                }
            }
            Self::Collection(c) => {
                for member in &mut c.members {
                    member.for_each_point(f);
                }
            }
        }
    }
}

fn polygon_point_count(p: &Polygon) -> usize {
    let exterior = p.exterior.as_ref().map_or(0, |r| r.points.len());
    exterior + p.holes.iter().map(|r| r.points.len()).sum::<usize>()
}

fn extent_of_points(points: &[Point]) -> Option<Extent> {
    let (first, rest) = points.split_first()?;
    let mut extent = first.extent();
    for p in rest {
        extent.merge_point(p);
    }
    Some(extent)
}

fn merge_extents(parts: impl Iterator<Item = Option<Extent>>) -> Option<Extent> {
    parts
        .flatten()
        .reduce(|acc, e| acc.merge(&e))
}
