//! Noise-steered particles whose trails accumulate on the canvas

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::canvas::paint::{fill_circle, wash};
use crate::color::palette::{Color, REFERENCE_BACKGROUND};
use crate::color::resolver::{particle_colors, uses_reference_colors};
use crate::io::configuration::{
    MOVE_SCALE, MOVE_SPEED, PARTICLE_COUNT, PARTICLE_SIZE, RESPAWN_PROBABILITY,
    TRANSPARENT_FADE_ALPHA,
};
use crate::math::noise::PerlinNoise;
use crate::spatial::quadtree::{Positioned, QuadTree, Rect};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use tracing::debug;

/// A single moving dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Fill color
    pub color: Color,
    /// Diameter in canvas pixels
    pub size: f64,
}

/// Particle position stored in the spatial index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRef {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Index into the field's particle list
    pub index: usize,
}

impl Positioned for ParticleRef {
    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Heading of a particle at a canvas position
///
/// The noise value is scaled by `MOVE_SCALE` a second time after dividing the
/// sample coordinates by it, which makes headings change sharply over short
/// distances.
pub fn heading(noise: &PerlinNoise, x: f64, y: f64, offset: (f64, f64)) -> f64 {
    noise.noise(x / MOVE_SCALE + offset.0, y / MOVE_SCALE + offset.1) * TAU * MOVE_SCALE
}

/// Fixed population of particles moving through a noise field
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    index: QuadTree<ParticleRef>,
    noise: PerlinNoise,
    rng: StdRng,
    width: f64,
    height: f64,
    noise_offset: (f64, f64),
}

impl ParticleField {
    /// Scatters `count` particles uniformly, cycling through `colors`
    pub fn new(width: f64, height: f64, count: usize, colors: &[Color], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = PerlinNoise::new(rng.random());
        let width = width.max(1.0);
        let height = height.max(1.0);

        let particles = (0..count)
            .map(|i| Particle {
                x: rng.random_range(0.0..width),
                y: rng.random_range(0.0..height),
                color: colors.get(i % colors.len().max(1)).copied().unwrap_or(Color::WHITE),
                size: PARTICLE_SIZE,
            })
            .collect();

        let mut field = Self {
            particles,
            index: QuadTree::with_default_capacity(Rect::from_origin(0.0, 0.0, width, height)),
            noise,
            rng,
            width,
            height,
            noise_offset: (0.0, 0.0),
        };
        field.rebuild_index();
        field
    }

    /// Shifts where the field samples the noise
    pub const fn set_noise_offset(&mut self, offset: (f64, f64)) {
        self.noise_offset = offset;
    }

    /// Current particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spatial index as of the last rebuild
    pub const fn index(&self) -> &QuadTree<ParticleRef> {
        &self.index
    }

    /// Moves every particle one step along the field
    ///
    /// Particles that leave the canvas, and a small random fraction of the
    /// rest, respawn at a uniformly random position.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            let angle = heading(&self.noise, particle.x, particle.y, self.noise_offset);
            particle.x += angle.cos() * MOVE_SPEED;
            particle.y += angle.sin() * MOVE_SPEED;

            let outside = particle.x < 0.0
                || particle.x > self.width
                || particle.y < 0.0
                || particle.y > self.height;
            if outside || self.rng.random_bool(RESPAWN_PROBABILITY) {
                particle.x = self.rng.random_range(0.0..self.width);
                particle.y = self.rng.random_range(0.0..self.height);
            }
        }
    }

    /// Reinserts every particle into a fresh spatial index
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        let mut dropped = 0usize;
        for (index, particle) in self.particles.iter().enumerate() {
            let entry = ParticleRef {
                x: particle.x,
                y: particle.y,
                index,
            };
            if !self.index.insert(entry) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(dropped, "particles outside the index boundary");
        }
    }

    /// Indices of particles within `radius` of a point (square neighbourhood)
    pub fn neighbors(&self, x: f64, y: f64, radius: f64) -> Vec<usize> {
        self.index
            .query(&Rect::new(x, y, radius, radius))
            .into_iter()
            .map(|entry| entry.index)
            .collect()
    }

    /// Draws every particle as a filled disc
    pub fn render(&self, img: &mut RgbaImage) {
        for particle in &self.particles {
            fill_circle(img, particle.x, particle.y, particle.size / 2.0, particle.color);
        }
    }
}

/// The particle flow algorithm
#[derive(Debug, Clone)]
pub struct PerlinFlow {
    field: ParticleField,
    fresh: bool,
}

impl PerlinFlow {
    /// Builds the population and paints the opening background
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let colors = particle_colors(ctx.palette_id, ctx.colors);
        let mut field = ParticleField::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
            PARTICLE_COUNT,
            &colors,
            seed,
        );

        if ctx.params.randomize_on_load {
            let mut rng = StdRng::seed_from_u64(seed ^ 0x5EED);
            field.set_noise_offset((rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)));
        }

        paint_background(canvas, ctx);
        Self {
            field,
            fresh: true,
        }
    }

    /// The particle population
    pub const fn field(&self) -> &ParticleField {
        &self.field
    }
}

// The bw and wb palettes keep their deep purple even in transparent mode
fn paint_background(canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
    if uses_reference_colors(ctx.palette_id) {
        canvas.clear(REFERENCE_BACKGROUND);
    } else if ctx.params.transparent_background {
        canvas.clear(Color::TRANSPARENT);
    } else {
        canvas.clear(ctx.colors.background);
    }
}

impl Generator for PerlinFlow {
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome {
        if self.fresh {
            paint_background(canvas, ctx);
            self.fresh = false;
        } else if ctx.params.transparent_background {
            wash(
                canvas.image_mut(),
                Color::BLACK.with_alpha(TRANSPARENT_FADE_ALPHA),
            );
        }

        let substeps = if ctx.capturing { 2 } else { 1 };
        for _ in 0..substeps {
            self.field.step();
        }
        self.field.rebuild_index();
        self.field.render(canvas.image_mut());
        TickOutcome::Drawn
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.fresh = true;
        self.field.rebuild_index();
        paint_background(canvas, ctx);
    }
}
