mod core;
mod error;
mod geometries;
mod wgpual;

pub use self::core::*;
pub use error::*;
pub use geometries::*;
pub use wgpual::*;

// wgpu re-exports
pub use wgpu::PowerPreference;
