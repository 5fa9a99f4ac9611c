//! Mathematical utilities shared by the generators

/// Interpolation, range mapping and easing helpers
pub mod interpolation;
/// Seeded fractal Perlin noise
pub mod noise;
