//! Device-backed meshes and their shading state.

mod mesh;
mod shading;

pub use mesh::*;
pub use shading::*;
