//! Grid data model: cell addressing, field storage, spatial lookup.

pub mod field;
pub mod index;
pub mod lookup;

pub use field::FlowField;
pub use index::{GridCell, NodeId};
pub use lookup::SpatialLookup;
