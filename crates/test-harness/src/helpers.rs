//! Geometry constructors and layer seeding for scenario tests.

use layer_engine::{Layer, LayerError};
use map_types::{
    FieldDef, FieldKind, FieldValue, Geometry, LineString, LinearRing, MultiPolygon, Point,
    Polygon,
};

/// Errors from harness helpers and assertions.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("layer error: {0}")]
    Layer(#[from] LayerError),
}

/// An axis-aligned square polygon with its min corner at `(x, y)`.
pub fn square(x: f64, y: f64, size: f64) -> Geometry {
    Geometry::Polygon(Polygon::new(closed_ring(&[
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
    ])))
}

/// A square with a centered square hole of half the side length.
pub fn square_with_hole(x: f64, y: f64, size: f64) -> Geometry {
    let inset = size / 4.0;
    Geometry::Polygon(Polygon::with_holes(
        closed_ring(&[
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
        ]),
        vec![closed_ring(&[
            (x + inset, y + inset),
            (x + size - inset, y + inset),
            (x + size - inset, y + size - inset),
            (x + inset, y + size - inset),
        ])],
    ))
}

/// Two disjoint squares as one multipolygon.
pub fn two_part_multipolygon(x: f64, y: f64, size: f64, gap: f64) -> Geometry {
    let part = |px: f64| {
        Polygon::new(closed_ring(&[
            (px, y),
            (px + size, y),
            (px + size, y + size),
            (px, y + size),
        ]))
    };
    Geometry::MultiPolygon(MultiPolygon {
        polygons: vec![part(x), part(x + size + gap)],
    })
}

/// An open polyline through the given vertices.
pub fn polyline(points: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(LineString::from_points(
        points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    ))
}

pub fn point(x: f64, y: f64) -> Geometry {
    Geometry::Point(Point::new(x, y))
}

/// A ring through the given vertices, explicitly closed.
pub fn closed_ring(points: &[(f64, f64)]) -> LinearRing {
    let mut ring =
        LinearRing::from_points(points.iter().map(|&(x, y)| Point::new(x, y)).collect());
    ring.close();
    ring
}

/// Builder that seeds a [`Layer`] with a schema and features in one
/// expression, the way scenario tests want to start.
pub struct LayerBuilder {
    name: String,
    schema: Vec<FieldDef>,
    features: Vec<(Geometry, Option<Vec<FieldValue>>)>,
}

impl LayerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.schema.push(FieldDef::new(name, kind));
        self
    }

    pub fn feature(mut self, geometry: Geometry, values: Vec<FieldValue>) -> Self {
        self.features.push((geometry, Some(values)));
        self
    }

    /// Add a feature with all-null attribute values.
    pub fn feature_bare(mut self, geometry: Geometry) -> Self {
        self.features.push((geometry, None));
        self
    }

    pub fn build(self) -> Result<Layer, HarnessError> {
        let field_count = self.schema.len();
        let mut layer = Layer::new(self.name, self.schema);
        for (geometry, values) in self.features {
            let values = values.unwrap_or_else(|| vec![FieldValue::Null; field_count]);
            layer.add_feature(geometry, values)?;
        }
        Ok(layer)
    }
}
