//! Feature access, deletion, and geometry mutation on [`Layer`].

use tracing::debug;

use crate::types::{Feature, LayerError};
use crate::Layer;

impl Layer {
    /// Total feature count, soft-deleted included.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Count of live (not soft-deleted) features.
    pub fn live_len(&self) -> usize {
        self.features.iter().filter(|f| !f.deleted).count()
    }

    /// Find a feature by FID, soft-deleted included.
    pub fn feature(&self, fid: u64) -> Option<&Feature> {
        self.features.iter().find(|f| f.fid == fid)
    }

    /// Feature at a storage position. Positions shift on hard delete; FIDs
    /// are the stable handle.
    pub fn feature_at(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Bounds-checked attribute access.
    pub fn value(&self, fid: u64, field: usize) -> Option<&map_types::FieldValue> {
        self.feature(fid).and_then(|f| f.values.get(field))
    }

    /// All features in insertion order, soft-deleted included.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Live features only — the iteration surface for rendering.
    pub fn iter_live(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| !f.deleted)
    }

    /// Soft delete: reversible, the feature stays in the container. Evicts
    /// the feature from the selection and marks the index dirty.
    pub fn soft_delete(&mut self, fid: u64) -> Result<(), LayerError> {
        let pos = self.position_of(fid)?;
        self.features[pos].deleted = true;
        if self.features[pos].selected {
            self.features[pos].selected = false;
            self.selection.retain(|&s| s != fid);
        }
        self.index_dirty = true;
        self.recompute_extent();
        debug!(layer = %self.name, fid, "feature soft-deleted");
        Ok(())
    }

    /// Undo a soft delete.
    pub fn restore(&mut self, fid: u64) -> Result<(), LayerError> {
        let pos = self.position_of(fid)?;
        self.features[pos].deleted = false;
        self.index_dirty = true;
        self.recompute_extent();
        Ok(())
    }

    /// Hard delete: remove and destroy the feature. Returns it so an undo
    /// layer can keep a backup copy.
    pub fn hard_delete(&mut self, fid: u64) -> Result<Feature, LayerError> {
        let pos = self.position_of(fid)?;
        let feature = self.features.remove(pos);
        self.selection.retain(|&s| s != fid);
        self.index_dirty = true;
        self.recompute_extent();
        debug!(layer = %self.name, fid, "feature hard-deleted");
        Ok(feature)
    }

    /// Translate a live feature's geometry, refreshing its cached extent and
    /// the layer extent.
    pub fn translate_feature(&mut self, fid: u64, dx: f64, dy: f64) -> Result<(), LayerError> {
        self.mutate_geometry(fid, |g| g.translate(dx, dy))
    }

    /// Rotate a live feature about its own extent center by an angle in
    /// degrees (the editor's clockwise convention).
    pub fn rotate_feature(&mut self, fid: u64, degrees: f64) -> Result<(), LayerError> {
        self.mutate_geometry(fid, |g| g.rotate_deg(degrees))
    }

    /// Rotate a live feature about an explicit center.
    pub fn rotate_feature_about(
        &mut self,
        fid: u64,
        cx: f64,
        cy: f64,
        sin_a: f64,
        cos_a: f64,
    ) -> Result<(), LayerError> {
        self.mutate_geometry(fid, |g| g.rotate(cx, cy, sin_a, cos_a))
    }

    fn mutate_geometry(
        &mut self,
        fid: u64,
        op: impl FnOnce(&mut map_types::Geometry),
    ) -> Result<(), LayerError> {
        let pos = self.position_of(fid)?;
        if self.features[pos].deleted {
            return Err(LayerError::FeatureDeleted { fid });
        }
        op(&mut self.features[pos].geometry);
        self.features[pos].refresh_extent();
        self.recompute_extent();
        self.index_dirty = true;
        Ok(())
    }

    fn position_of(&self, fid: u64) -> Result<usize, LayerError> {
        self.features
            .iter()
            .position(|f| f.fid == fid)
            .ok_or(LayerError::FeatureNotFound { fid })
    }
}
