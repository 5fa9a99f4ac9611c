//! Color model, palettes and inversion

/// Colors, color sets and the palette registry
pub mod palette;
/// Inversion and per-algorithm color derivation
pub mod resolver;
