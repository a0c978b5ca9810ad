//! Ready-made solids.

mod octahedron;
mod polyhedron;
mod pyramid;

pub use octahedron::*;
pub use polyhedron::*;
pub use pyramid::*;

/// Face colors shared by the built-in solids.
pub mod palette {
    /// Opaque red.
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Opaque green.
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Opaque blue.
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    /// Opaque yellow.
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    /// Opaque cyan.
    pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    /// Opaque magenta.
    pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}
