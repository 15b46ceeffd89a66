//! Feature/layer container for the vector GIS core.
//!
//! A [`Layer`] owns its features, their shared field schema, a cached layer
//! extent, and the grid spatial index built over the live feature set. Every
//! structural mutation (add, delete, move, rotate) marks the index dirty;
//! queries rebuild lazily before delegating, so a caller can never observe a
//! stale index through this API.

pub mod features;
pub mod selection;
pub mod types;

use map_types::{Extent, FieldDef, FieldValue, Geometry};
use tracing::debug;
use uuid::Uuid;

use grid_index::GridIndex;

pub use types::{Feature, LayerError};

/// An editable feature layer.
pub struct Layer {
    /// Layer identity, stable across renames.
    pub id: Uuid,
    /// User-visible layer name.
    pub name: String,
    schema: Vec<FieldDef>,
    features: Vec<Feature>,
    next_fid: u64,
    extent: Option<Extent>,
    index: Option<GridIndex>,
    index_generation: u64,
    index_dirty: bool,
    selection: Vec<u64>,
}

impl Layer {
    pub fn new(name: impl Into<String>, schema: Vec<FieldDef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            schema,
            features: Vec::new(),
            next_fid: 1,
            extent: None,
            index: None,
            index_generation: 0,
            index_dirty: false,
            selection: Vec::new(),
        }
    }

    pub fn schema(&self) -> &[FieldDef] {
        &self.schema
    }

    /// Position of a field in the schema by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|f| f.name == name)
    }

    /// Union of all live feature extents, or `None` for an empty layer.
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Insert a fully-populated feature (geometry plus attribute values, as a
    /// file reader or editing operation produces them), assigning its FID.
    pub fn add_feature(
        &mut self,
        geometry: Geometry,
        values: Vec<FieldValue>,
    ) -> Result<u64, LayerError> {
        if values.len() != self.schema.len() {
            return Err(LayerError::FieldCountMismatch {
                expected: self.schema.len(),
                got: values.len(),
            });
        }
        for (def, value) in self.schema.iter().zip(&values) {
            if !value.matches(def.kind) {
                return Err(LayerError::FieldTypeMismatch {
                    field: def.name.clone(),
                });
            }
        }

        let fid = self.next_fid;
        self.next_fid += 1;
        let feature = Feature::new(fid, geometry, values);
        if let Some(fe) = feature.extent {
            self.extent = Some(match self.extent {
                Some(e) => e.merge(&fe),
                None => fe,
            });
        }
        self.features.push(feature);
        self.index_dirty = true;
        debug!(layer = %self.name, fid, "feature added");
        Ok(fid)
    }

    /// Rebuild the grid index over the live (non-deleted) feature set and
    /// bump the generation. The explicit entry point for callers that want
    /// to pay the cost eagerly; queries otherwise rebuild lazily.
    pub fn rebuild_index(&mut self) {
        self.index_generation += 1;
        let index = match self.extent {
            Some(extent) => {
                let entries: Vec<(usize, &Geometry)> = self
                    .features
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| !f.deleted)
                    .map(|(slot, f)| (slot, &f.geometry))
                    .collect();
                GridIndex::build(extent, &entries, self.index_generation)
            }
            None => GridIndex::empty(self.index_generation),
        };
        debug!(
            layer = %self.name,
            generation = self.index_generation,
            rows = index.rows(),
            cols = index.cols(),
            "grid index rebuilt"
        );
        self.index = Some(index);
        self.index_dirty = false;
    }

    fn ensure_index(&mut self) {
        if self.index_dirty || self.index.is_none() {
            self.rebuild_index();
        }
    }

    /// Find the first live feature at `(x, y)`, within `tol` for point and
    /// line geometries. Returns its FID.
    ///
    /// Short-circuits without touching the index when the point lies outside
    /// the layer's cached extent.
    pub fn query_point(&mut self, x: f64, y: f64, tol: f64) -> Option<u64> {
        match self.extent {
            Some(e) if e.contains_point(x, y) => {}
            _ => return None,
        }
        self.ensure_index();
        let index = self.index.as_ref()?;
        debug_assert_eq!(index.generation(), self.index_generation);
        let features = &self.features;
        index
            .query_point(x, y, tol, |slot| {
                features.get(slot).filter(|f| !f.deleted).map(|f| &f.geometry)
            })
            .and_then(|slot| features.get(slot))
            .map(|f| f.fid)
    }

    /// All live features intersecting `rect`, de-duplicated, in FID order of
    /// their storage slots.
    pub fn query_rect(&mut self, rect: &Extent) -> Vec<u64> {
        match self.extent {
            Some(e) if e.intersects(rect) => {}
            _ => return Vec::new(),
        }
        self.ensure_index();
        let Some(index) = self.index.as_ref() else {
            return Vec::new();
        };
        debug_assert_eq!(index.generation(), self.index_generation);
        let features = &self.features;
        index
            .query_rect(rect, |slot| {
                features.get(slot).filter(|f| !f.deleted).map(|f| &f.geometry)
            })
            .into_iter()
            .filter_map(|slot| features.get(slot))
            .map(|f| f.fid)
            .collect()
    }

    /// True if a query would rebuild the index first.
    pub fn index_is_dirty(&self) -> bool {
        self.index_dirty || self.index.is_none()
    }

    /// Generation of the last index build.
    pub fn index_generation(&self) -> u64 {
        self.index_generation
    }

    pub(crate) fn recompute_extent(&mut self) {
        self.extent = self
            .features
            .iter()
            .filter(|f| !f.deleted)
            .filter_map(|f| f.extent)
            .reduce(|acc, e| acc.merge(&e));
    }
}
