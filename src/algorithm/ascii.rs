//! Brightness mapped onto a character ramp

use crate::algorithm::dither::luma_grid;
use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_glyph};
use crate::canvas::master::MasterCanvas;
use crate::io::configuration::{ASCII_MIN_CELL, ASCII_RAMP};
use ndarray::Array2;
use tracing::debug;

/// Cell edge length for a canvas width and normalized complexity
///
/// `canvas / (40 + 12 * complexity)`, never below [`ASCII_MIN_CELL`].
pub fn cell_size(canvas_width: u32, complexity: u32) -> u32 {
    (canvas_width / (40 + 12 * complexity)).max(ASCII_MIN_CELL)
}

/// Ramp character for a brightness in `[0, 255]`
pub fn ramp_char(luma: f64) -> char {
    let count = ASCII_RAMP.chars().count();
    let position = (luma.clamp(0.0, 255.0) / 255.0 * (count - 1) as f64).round() as usize;
    ASCII_RAMP.chars().nth(position).unwrap_or(' ')
}

/// The ASCII mosaic algorithm
#[derive(Debug, Clone)]
pub struct AsciiMosaic {
    luma: Array2<f64>,
    cell: u32,
}

impl AsciiMosaic {
    /// Averages the source per cell and draws the mosaic
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let cell = cell_size(canvas.width(), ctx.normalized.complexity);
        let columns = (canvas.width() / cell).max(1) as usize;
        let rows = (canvas.height() / cell).max(1) as usize;
        debug!(columns, rows, cell, "ascii grid sampled");

        let generator = Self {
            luma: luma_grid(columns, rows, ctx.source, seed),
            cell,
        };
        generator.render(canvas, ctx);
        generator
    }

    /// Cell edge length in canvas pixels
    pub const fn cell(&self) -> u32 {
        self.cell
    }

    /// Characters of the mosaic, one string per row
    pub fn lines(&self) -> Vec<String> {
        self.luma
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&luma| ramp_char(luma)).collect())
            .collect()
    }

    fn render(&self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        canvas.clear(ctx.colors.background);
        let cell = f64::from(self.cell);
        let scale = (cell / f64::from(GLYPH_HEIGHT + 1)).max(1.0);
        let inset_x = (cell - f64::from(GLYPH_WIDTH) * scale) / 2.0;
        let inset_y = (cell - f64::from(GLYPH_HEIGHT) * scale) / 2.0;
        let image = canvas.image_mut();

        for ((row, column), &luma) in self.luma.indexed_iter() {
            let c = ramp_char(luma);
            if c == ' ' {
                continue;
            }
            draw_glyph(
                image,
                c,
                column as f64 * cell + inset_x,
                row as f64 * cell + inset_y,
                scale,
                ctx.colors.foreground,
            );
        }
    }
}

impl Generator for AsciiMosaic {
    fn tick(&mut self, _canvas: &mut MasterCanvas, _ctx: &TickContext<'_>) -> TickOutcome {
        TickOutcome::Idle
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.render(canvas, ctx);
    }
}
