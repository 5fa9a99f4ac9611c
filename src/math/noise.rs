//! Seeded 2D Perlin noise with octave summation
//!
//! Every algorithm samples the same kind of field: classic gradient noise on a
//! shuffled permutation table, summed over a few octaves with halving
//! amplitude and normalized back into `[0, 1]`.

use crate::math::interpolation::{fade, lerp};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Octaves summed by default
pub const DEFAULT_OCTAVES: u32 = 4;
/// Amplitude multiplier between octaves
pub const DEFAULT_FALLOFF: f64 = 0.5;

/// Fractal Perlin noise source
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perm: [u8; 256],
    octaves: u32,
    falloff: f64,
}

impl PerlinNoise {
    /// Noise field with default detail for a seed
    pub fn new(seed: u64) -> Self {
        let mut noise = Self {
            perm: [0; 256],
            octaves: DEFAULT_OCTAVES,
            falloff: DEFAULT_FALLOFF,
        };
        noise.reseed(seed);
        noise
    }

    /// Sets octave count and falloff, clamping to usable values
    #[must_use]
    pub fn with_detail(mut self, octaves: u32, falloff: f64) -> Self {
        self.octaves = octaves.clamp(1, 8);
        self.falloff = if falloff.is_finite() {
            falloff.clamp(0.05, 0.95)
        } else {
            DEFAULT_FALLOFF
        };
        self
    }

    /// Rebuilds the permutation table from a new seed
    pub fn reseed(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for (slot, value) in self.perm.iter_mut().zip(0u8..=255) {
            *slot = value;
        }
        self.perm.shuffle(&mut rng);
    }

    fn hash(&self, x: i64) -> u8 {
        self.perm.get((x & 255) as usize).copied().unwrap_or(0)
    }

    /// Single octave in `[0, 1]`
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor() as i64;
        let yi = y.floor() as i64;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let aa = self.hash(i64::from(self.hash(xi)) + yi);
        let ab = self.hash(i64::from(self.hash(xi)) + yi + 1);
        let ba = self.hash(i64::from(self.hash(xi + 1)) + yi);
        let bb = self.hash(i64::from(self.hash(xi + 1)) + yi + 1);

        let x1 = lerp(gradient(aa, xf, yf), gradient(ba, xf - 1.0, yf), u);
        let x2 = lerp(
            gradient(ab, xf, yf - 1.0),
            gradient(bb, xf - 1.0, yf - 1.0),
            u,
        );

        (lerp(x1, x2, v) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Octave sum in `[0, 1]`
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;

        for _ in 0..self.octaves {
            value += self.sample(x * frequency, y * frequency) * amplitude;
            total += amplitude;
            amplitude *= self.falloff;
            frequency *= 2.0;
        }

        if total > 0.0 { value / total } else { 0.5 }
    }
}

fn gradient(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let u = if h < 4 { x } else { y };
    let v = if h < 4 { y } else { x };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}
