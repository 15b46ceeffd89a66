//! Grid spatial index over a layer's features.
//!
//! The index partitions a layer's bounding extent into a rows × cols grid of
//! cells; each cell holds the slots (indices into the layer's feature vector)
//! of every feature whose precise geometry intersects the cell. The index
//! owns no features and tracks no mutation: the owning layer decides when to
//! rebuild and checks the [`GridIndex::generation`] it stored at build time.

pub mod cell;
pub mod index;

pub use cell::GridCell;
pub use index::GridIndex;
