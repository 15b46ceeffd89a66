//! Selection-set management on [`Layer`].
//!
//! The selection is a FID list plus a per-feature flag. Invariant: a
//! feature's flag is true iff its FID appears in the list. Every path that
//! touches either side goes through here (or through the delete paths, which
//! evict), so the two can not drift apart.

use crate::types::LayerError;
use crate::Layer;

impl Layer {
    /// Add a live feature to the selection. Selecting an already-selected
    /// feature is a no-op, not a duplicate.
    pub fn select(&mut self, fid: u64) -> Result<(), LayerError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.fid == fid)
            .ok_or(LayerError::FeatureNotFound { fid })?;
        if feature.deleted {
            return Err(LayerError::FeatureDeleted { fid });
        }
        if !feature.selected {
            feature.selected = true;
            self.selection.push(fid);
        }
        Ok(())
    }

    /// Remove a feature from the selection. Deselecting an unselected
    /// feature is a no-op.
    pub fn deselect(&mut self, fid: u64) -> Result<(), LayerError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.fid == fid)
            .ok_or(LayerError::FeatureNotFound { fid })?;
        if feature.selected {
            feature.selected = false;
            self.selection.retain(|&s| s != fid);
        }
        Ok(())
    }

    /// Empty the selection, clearing every flag.
    pub fn clear_selection(&mut self) {
        for feature in &mut self.features {
            feature.selected = false;
        }
        self.selection.clear();
    }

    /// Selected FIDs in selection order.
    pub fn selection(&self) -> &[u64] {
        &self.selection
    }

    pub fn is_selected(&self, fid: u64) -> bool {
        self.feature(fid).map_or(false, |f| f.selected)
    }
}
