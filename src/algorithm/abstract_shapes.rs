//! De Stijl composition driven by a cellular automaton
//!
//! A square grid of cells laid over noise-split row and column boundaries.
//! State 0 is the background, states 1 to 3 are primary colors that beat each
//! other in a cycle, state 4 is the line color. Black lines are drawn
//! wherever two neighboring cells disagree.

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::canvas::paint::{fill_rect, stroke_line};
use crate::color::palette::{Color, ColorSet};
use crate::io::configuration::{
    ABSTRACT_CAPTURE_GRID, ABSTRACT_GRID, ABSTRACT_MUTATION_PROBABILITY, ABSTRACT_UPDATE_INTERVAL,
};
use crate::math::interpolation::{constrain, map_range};
use crate::math::noise::PerlinNoise;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Number of cell states
pub const STATES: u8 = 5;
/// Background state
pub const BACKGROUND: u8 = 0;
/// Line state
pub const LINE: u8 = 4;

/// Beating neighbors that convert a colored cell
pub const MIN_BEATEN: usize = 3;
/// Beating neighbors above which a colored cell is cleared
pub const MAX_BEATEN: usize = 5;
/// Background neighbors above which a background cell takes a color
pub const MIN_WHITE: usize = 6;
/// Same-colored neighbors at which a colored cell gives way
pub const MAX_SAME_COLOR: usize = 6;
/// Probability that a crowded colored cell turns into a line cell
pub const LINE_PROBABILITY: f64 = 0.3;

/// Color that beats `state`, for the primary states 1 to 3
///
/// Blue beats red, red beats yellow, yellow beats blue.
pub const fn beaten_by(state: u8) -> Option<u8> {
    match state {
        1 => Some(2),
        2 => Some(3),
        3 => Some(1),
        _ => None,
    }
}

/// Line width in reference pixels for a density percentage, in `[1, 3]`
pub fn line_width(density_percent: f64) -> f64 {
    ((density_percent.clamp(0.0, 100.0) / 100.0 * 2.0).ceil() + 1.0).clamp(1.0, 3.0)
}

/// Boundaries of `2^depth` spans covering `[start, end]`
///
/// Each split is moved off-center by up to 15% of the span according to the
/// noise field, but never closer than 10% to either edge. The returned list
/// starts with `start` and excludes `end`.
pub fn split_axis(noise: &PerlinNoise, start: f64, end: f64, depth: u32, frequency: f64) -> Vec<f64> {
    if depth == 0 {
        return vec![start];
    }
    let span = end - start;
    let offset = map_range(noise.noise(start * frequency, end * frequency), 0.0, 1.0, -0.15, 0.15) * span;
    let mid = constrain((start + end) / 2.0 + offset, start + span * 0.1, end - span * 0.1);

    let mut positions = split_axis(noise, start, mid, depth - 1, frequency);
    positions.extend(split_axis(noise, mid, end, depth - 1, frequency));
    positions
}

/// Next state of one cell given its neighbor counts
///
/// `roll` is a uniform sample in `[0, 1)` used by the crowding rule.
pub fn next_state(state: u8, counts: &[usize; STATES as usize], roll: f64) -> u8 {
    let count = |s: u8| counts.get(usize::from(s)).copied().unwrap_or(0);

    match state {
        BACKGROUND if count(BACKGROUND) > MIN_WHITE => {
            // Least common primary, first wins on ties
            (1..=3).min_by_key(|&c| count(c)).unwrap_or(1)
        }
        BACKGROUND => (1..=3).find(|&c| count(c) > MAX_BEATEN).unwrap_or(BACKGROUND),
        1..=3 => {
            let attacker = beaten_by(state).unwrap_or(state);
            let attackers = count(attacker);
            if attackers > MAX_BEATEN {
                BACKGROUND
            } else if attackers >= MIN_BEATEN {
                attacker
            } else if count(state) >= MAX_SAME_COLOR {
                if roll < LINE_PROBABILITY { LINE } else { BACKGROUND }
            } else {
                state
            }
        }
        _ => (1..=3)
            .find(|&c| count(c) > 4)
            .and_then(beaten_by)
            .unwrap_or(state),
    }
}

/// Per-state fill colors
pub fn state_colors(colors: &ColorSet) -> [Color; STATES as usize] {
    let palette = &colors.foreground_palette;
    let primaries = match palette.first() {
        Some(&first) => [
            first,
            palette.get(1).copied().unwrap_or(colors.foreground),
            palette.get(2).copied().unwrap_or(colors.foreground),
        ],
        None => [
            Color::rgb(220, 50, 50),
            Color::rgb(50, 50, 220),
            Color::rgb(220, 220, 50),
        ],
    };
    let [red, blue, yellow] = primaries;
    [colors.background, red, blue, yellow, colors.foreground]
}

/// The abstract composition algorithm
#[derive(Debug, Clone)]
pub struct AbstractShapes {
    grid: Array2<u8>,
    columns: Vec<f64>,
    rows: Vec<f64>,
    rng: StdRng,
    tick: u64,
}

impl AbstractShapes {
    /// Seeds the grid with background and primary cells and draws it
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let size = if ctx.capturing { ABSTRACT_CAPTURE_GRID } else { ABSTRACT_GRID };
        let depth = size.ilog2();
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = PerlinNoise::new(rng.random());
        let frequency = 0.001 * (1.0 + ctx.params.noise_scale / 10.0);

        let columns = split_axis(&noise, 0.0, f64::from(canvas.width()), depth, frequency);
        let rows = split_axis(&noise, 0.0, f64::from(canvas.height()), depth, frequency * 1.7);
        let grid = Array2::from_shape_fn((size, size), |_| rng.random_range(0..LINE));
        debug!(size, depth, "abstract grid initialized");

        let generator = Self {
            grid,
            columns,
            rows,
            rng,
            tick: 0,
        };
        generator.render(canvas, ctx);
        generator
    }

    /// Current cell states, indexed by `(column, row)`
    pub const fn grid(&self) -> &Array2<u8> {
        &self.grid
    }

    /// Left edges of the grid columns
    pub fn column_positions(&self) -> &[f64] {
        &self.columns
    }

    /// Top edges of the grid rows
    pub fn row_positions(&self) -> &[f64] {
        &self.rows
    }

    /// Applies the rules to every cell at once on a wrapping grid
    pub fn step(&mut self) {
        let (width, height) = self.grid.dim();
        let current = self.grid.clone();

        for ((i, j), cell) in self.grid.indexed_iter_mut() {
            let mut counts = [0usize; STATES as usize];
            for di in [width - 1, 0, 1] {
                for dj in [height - 1, 0, 1] {
                    if di == 0 && dj == 0 {
                        continue;
                    }
                    let neighbor = current.get(((i + di) % width, (j + dj) % height));
                    if let Some(slot) = neighbor.and_then(|&s| counts.get_mut(usize::from(s))) {
                        *slot += 1;
                    }
                }
            }

            let state = current.get((i, j)).copied().unwrap_or(BACKGROUND);
            *cell = next_state(state, &counts, self.rng.random());
            if self.rng.random_bool(ABSTRACT_MUTATION_PROBABILITY) {
                *cell = self.rng.random_range(0..STATES);
            }
        }
    }

    fn span(positions: &[f64], index: usize, limit: f64) -> (f64, f64) {
        let start = positions.get(index).copied().unwrap_or(limit);
        let end = positions.get(index + 1).copied().unwrap_or(limit);
        (start.floor(), end.ceil())
    }

    fn render(&self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        let colors = state_colors(ctx.colors);
        let (width, height) = canvas.dimensions();
        let (width, height) = (f64::from(width), f64::from(height));
        canvas.clear(ctx.colors.background);
        let image = canvas.image_mut();

        for ((i, j), &state) in self.grid.indexed_iter() {
            let (x1, x2) = Self::span(&self.columns, i, width);
            let (y1, y2) = Self::span(&self.rows, j, height);
            let color = colors.get(usize::from(state)).copied().unwrap_or(ctx.colors.background);
            fill_rect(image, x1, y1, x2 - x1, y2 - y1, color);
        }

        let reference = width.max(height) / 1000.0;
        let mut stroke = line_width(ctx.params.density) * reference.max(1.0);
        if ctx.capturing {
            stroke *= 1.5;
        }
        let line = ctx.colors.foreground;

        for ((i, j), &state) in self.grid.indexed_iter() {
            let (x1, x2) = Self::span(&self.columns, i, width);
            let (y1, y2) = Self::span(&self.rows, j, height);
            if self.grid.get((i + 1, j)).is_some_and(|&right| right != state) {
                stroke_line(image, (x2, y1), (x2, y2), stroke, line);
            }
            if self.grid.get((i, j + 1)).is_some_and(|&below| below != state) {
                stroke_line(image, (x1, y2), (x2, y2), stroke, line);
            }
        }
    }
}

impl Generator for AbstractShapes {
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome {
        if ctx.capturing || self.tick % ABSTRACT_UPDATE_INTERVAL == 0 {
            self.step();
        }
        self.tick += 1;
        self.render(canvas, ctx);
        TickOutcome::Drawn
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.render(canvas, ctx);
    }
}
