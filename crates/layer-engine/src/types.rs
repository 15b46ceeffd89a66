use serde::{Deserialize, Serialize};

use map_types::{Extent, FieldValue, Geometry};

/// One logical record in a layer: a geometry plus positional attribute
/// values matched against the layer's field schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Feature id, unique within the owning layer, assigned on insertion.
    pub fid: u64,
    /// The geometry, exclusively owned.
    pub geometry: Geometry,
    /// Attribute values, one per schema field, positionally matched.
    pub values: Vec<FieldValue>,
    /// Cached bounding extent; refreshed by the layer after every geometry
    /// mutation it performs.
    pub extent: Option<Extent>,
    /// Soft-delete flag. A soft-deleted feature stays in the container but
    /// is excluded from rendering, fresh selections, and fresh index builds.
    pub deleted: bool,
    /// Selection flag, kept in sync with the layer's selection list.
    pub selected: bool,
}

impl Feature {
    pub fn new(fid: u64, geometry: Geometry, values: Vec<FieldValue>) -> Self {
        let extent = geometry.extent();
        Self {
            fid,
            geometry,
            values,
            extent,
            deleted: false,
            selected: false,
        }
    }

    /// Recompute the cached extent from the current geometry.
    pub fn refresh_extent(&mut self) {
        self.extent = self.geometry.extent();
    }
}

/// Errors from the layer container.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LayerError {
    #[error("feature not found: fid {fid}")]
    FeatureNotFound { fid: u64 },

    #[error("feature fid {fid} is deleted")]
    FeatureDeleted { fid: u64 },

    #[error("expected {expected} field values, got {got}")]
    FieldCountMismatch { expected: usize, got: usize },

    #[error("value for field '{field}' does not match its declared kind")]
    FieldTypeMismatch { field: String },
}
