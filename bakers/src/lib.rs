//! Bakers

#[macro_use]
extern crate log;

mod blackbody;
mod env_brdf;
mod gloss_normal;
mod multiscatter_brdf;
mod noise;
mod subsurface;
mod test_pattern;

// Re-export.
pub use blackbody::*;
pub use env_brdf::*;
pub use gloss_normal::*;
pub use multiscatter_brdf::*;
pub use noise::*;
pub use subsurface::*;
pub use test_pattern::*;
