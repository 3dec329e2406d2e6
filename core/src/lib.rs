//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod bake;
pub mod color;
pub mod error;
pub mod geometry;
pub mod image_io;
pub mod low_discrepancy;
pub mod math;
pub mod microfacet;
pub mod rng;
pub mod spectrum;
