use map_types::Extent;

/// One rectangular partition of the indexed extent.
#[derive(Debug, Clone)]
pub struct GridCell {
    /// Row-major cell id (`row * cols + col`).
    pub id: usize,
    /// The cell's sub-extent of the layer extent.
    pub extent: Extent,
    /// Slots of features whose geometry intersects this cell. A feature
    /// straddling a cell boundary appears in every cell it touches.
    pub slots: Vec<usize>,
}

impl GridCell {
    pub fn new(id: usize, extent: Extent) -> Self {
        Self {
            id,
            extent,
            slots: Vec::new(),
        }
    }
}
