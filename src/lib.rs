//! Procedural wallpaper generation on a high-resolution master canvas
//!
//! A single engine owns the canvas and one active generative algorithm,
//! advances it one tick at a time, maps a visible window of the canvas onto a
//! preview surface and cuts exports at output sizes independent of that
//! preview.

#![forbid(unsafe_code)]

/// Generative algorithms and the engine that drives them
pub mod algorithm;
/// Master canvas, viewport, rasterization and export cropping
pub mod canvas;
/// Colors, palettes and inversion
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Interpolation helpers and gradient noise
pub mod math;
/// User parameters and their normalization
pub mod params;
/// Quadtree and hex lattice
pub mod spatial;

pub use io::error::{Result, WallgenError};
