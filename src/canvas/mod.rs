//! Master canvas, preview mapping, drawing primitives and export

/// Export cropping, scaling and metadata
pub mod export;
/// Built-in bitmap font
pub mod glyphs;
/// The engine-owned drawing surface
pub mod master;
/// Blending and shape rasterization
pub mod paint;
/// Preview surface mapping
pub mod viewport;
