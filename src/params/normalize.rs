//! Percentage controls mapped into each algorithm's native ranges

use crate::params::parameters::{
    DEFAULT_COMPLEXITY, DEFAULT_DENSITY, DEFAULT_NOISE_SCALE, DEFAULT_SPEED, ParameterSet,
    clamp_percent,
};

/// Native noise scale bounds
pub const NOISE_SCALE_RANGE: (f64, f64) = (0.0, 0.01);
/// Native speed bounds
pub const SPEED_RANGE: (f64, f64) = (0.0, 5.0);
/// Native complexity bounds
pub const COMPLEXITY_RANGE: (u32, u32) = (1, 11);
/// Native density bounds
pub const DENSITY_RANGE: (u32, u32) = (100, 600);

/// Parameter values in algorithm units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedParams {
    /// Noise sampling frequency in `[0, 0.01]`
    pub noise_scale: f64,
    /// Speed in `[0, 5]`
    pub speed: f64,
    /// Complexity level in `[1, 11]`
    pub complexity: u32,
    /// Density in `[100, 600]`
    pub density: u32,
}

/// Maps a parameter set into native units, clamping first
pub fn normalize(params: &ParameterSet) -> NormalizedParams {
    NormalizedParams {
        noise_scale: noise_scale(params.noise_scale),
        speed: speed(params.speed),
        complexity: complexity(params.complexity),
        density: density(params.density),
    }
}

/// `noise% / 100 * 0.01`
pub fn noise_scale(percent: f64) -> f64 {
    clamp_percent(percent, DEFAULT_NOISE_SCALE) / 100.0 * NOISE_SCALE_RANGE.1
}

/// `speed% / 100 * 5`
pub fn speed(percent: f64) -> f64 {
    clamp_percent(percent, DEFAULT_SPEED) / 100.0 * SPEED_RANGE.1
}

/// `floor(complexity% / 100 * 10) + 1`
pub fn complexity(percent: f64) -> u32 {
    let level = (clamp_percent(percent, DEFAULT_COMPLEXITY) / 100.0 * 10.0).floor() as u32 + 1;
    level.clamp(COMPLEXITY_RANGE.0, COMPLEXITY_RANGE.1)
}

/// `floor(density% / 100 * 500) + 100`
pub fn density(percent: f64) -> u32 {
    let level = (clamp_percent(percent, DEFAULT_DENSITY) / 100.0 * 500.0).floor() as u32 + 100;
    level.clamp(DENSITY_RANGE.0, DENSITY_RANGE.1)
}

/// Neighbor votes the hex automaton needs before a cell flips, in `[1, 3]`
pub fn hex_threshold(complexity_percent: f64) -> usize {
    let votes = (clamp_percent(complexity_percent, DEFAULT_COMPLEXITY) / 40.0).floor() as usize + 1;
    votes.clamp(1, 3)
}

/// Density as a unit fraction of its native range
pub fn density_fraction(params: &NormalizedParams) -> f64 {
    f64::from(params.density - DENSITY_RANGE.0) / f64::from(DENSITY_RANGE.1 - DENSITY_RANGE.0)
}
