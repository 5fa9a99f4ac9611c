//! Hex-grid rock-paper-scissors automaton rendered as filled hexagons

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::canvas::paint::fill_polygon;
use crate::color::palette::{Color, ColorSet};
use crate::color::resolver::cell_colors;
use crate::io::configuration::{
    HEX_CAPTURE_STEPS, HEX_MIN_CELL_SIZE, HEX_MIN_STATES, HEX_PREVIEW_STEPS,
};
use crate::params::normalize::hex_threshold;
use crate::spatial::hex::HexLattice;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Hex radius for a normalized complexity level
pub fn cell_size(complexity: u32) -> f64 {
    (50.0 - f64::from(complexity) * 0.4).floor().max(HEX_MIN_CELL_SIZE)
}

/// Probability of drawing states 0 or 1 during randomization
///
/// Takes the normalized density. Its range starts at 100, so every
/// density setting saturates the bias at 0.5.
pub fn density_bias(density: u32) -> f64 {
    (f64::from(density) / 200.0).min(0.5)
}

/// Cyclic states for a color set: one per drawing color plus the background
pub fn state_count(colors: &ColorSet) -> usize {
    (colors.drawing_colors().len() + 1).max(HEX_MIN_STATES)
}

/// Automaton steps between updates for a normalized speed
///
/// Slow speeds skip steps so the pattern evolves more calmly.
pub fn update_interval(speed: f64) -> usize {
    if speed <= 0.0 {
        return usize::MAX;
    }
    ((10.0 / speed).floor() as usize).max(1)
}

/// The hex cellular automaton algorithm
#[derive(Debug, Clone)]
pub struct HexCellular {
    lattice: HexLattice,
    colors: Vec<Color>,
    generation: u64,
}

impl HexCellular {
    /// Builds and randomizes the lattice, then draws it once
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let colors = cell_colors(ctx.colors);
        let state_count = state_count(ctx.colors);
        let mut lattice = HexLattice::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
            cell_size(ctx.normalized.complexity),
            state_count,
            hex_threshold(ctx.params.complexity),
        );

        let mut rng = StdRng::seed_from_u64(seed);
        lattice.randomize(&mut rng, density_bias(ctx.normalized.density));
        debug!(
            cells = lattice.len(),
            states = state_count,
            threshold = lattice.threshold(),
            "hex lattice initialized"
        );

        let generator = Self {
            lattice,
            colors,
            generation: 0,
        };
        generator.render(canvas, ctx.colors.background);
        generator
    }

    /// The automaton state
    pub const fn lattice(&self) -> &HexLattice {
        &self.lattice
    }

    /// Automaton passes applied so far
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn render(&self, canvas: &mut MasterCanvas, background: Color) {
        canvas.clear(background);
        let geometry = *self.lattice.geometry();
        let image = canvas.image_mut();
        for cell in self.lattice.cells() {
            let Some(state) = self.lattice.state(cell) else {
                continue;
            };
            let color = self
                .colors
                .get(usize::from(state) % self.colors.len().max(1))
                .copied()
                .unwrap_or(background);
            fill_polygon(image, &geometry.vertices(cell), color);
        }
    }
}

impl Generator for HexCellular {
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome {
        let steps = if ctx.capturing {
            HEX_CAPTURE_STEPS
        } else {
            HEX_PREVIEW_STEPS
        };
        let interval = update_interval(ctx.normalized.speed);

        for step in 0..steps {
            if step % interval == 0 {
                self.lattice.update();
                self.generation += 1;
            }
        }

        self.render(canvas, ctx.colors.background);
        TickOutcome::Drawn
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.lattice.set_threshold(hex_threshold(ctx.params.complexity));
        self.render(canvas, ctx.colors.background);
    }
}
