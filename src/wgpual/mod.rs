//! WebGPU Abstraction Layer (WGPUAL).
//!
//! This layer abstracts away where buffers live so meshes can be built and
//! updated the same way on a GPU or in host memory.

mod device;
mod gpu;
mod host;

pub use device::*;
pub use gpu::*;
pub use host::*;
