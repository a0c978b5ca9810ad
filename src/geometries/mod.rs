//! Solid topologies and the attribute buffers computed from them.

mod buffer_geometry;
mod geometry;
mod layout;
pub mod normals;
mod solids;
mod topology;

pub use buffer_geometry::*;
pub use geometry::*;
pub use layout::*;
pub use solids::*;
pub use topology::*;
