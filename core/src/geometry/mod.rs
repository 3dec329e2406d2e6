//! Geometry

mod point2;
mod vector3;

// Re-export
pub use point2::*;
pub use vector3::*;
