//! Geometry derived from atom positions: bonds, ribbon plates and the
//! backbone trace.

pub mod bonds;
pub mod grid;
pub mod ribbon;
pub mod trace;

pub use bonds::{bonded_pairs, Bond, BondClass};
pub use grid::SpatialGrid;
pub use ribbon::{Crease, RibbonQuad};
pub use trace::TraceSegment;
