//! Two-tone Floyd–Steinberg dithering
//!
//! The source is reduced to a grid of dots, each dot is quantized to the
//! foreground or background color and the quantization error is pushed onto
//! the neighbors not yet visited. The frame is drawn once per
//! initialization and held afterwards.

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::canvas::paint::fill_rect;
use crate::color::palette::{Color, ColorSet};
use crate::math::interpolation::map_range;
use crate::math::noise::PerlinNoise;
use bitvec::prelude::{BitVec, bitvec};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use ndarray::Array2;
use tracing::debug;

/// Error shares for the right, below-left, below and below-right neighbors
pub const DIFFUSION: [((isize, isize), f64); 4] = [
    ((0, 1), 7.0 / 16.0),
    ((1, -1), 3.0 / 16.0),
    ((1, 0), 5.0 / 16.0),
    ((1, 1), 1.0 / 16.0),
];

/// Luma threshold for a normalized complexity level
///
/// `map(complexity, 1..11, 0.3..0.7) * 255`
pub fn threshold(complexity: u32) -> f64 {
    map_range(f64::from(complexity), 1.0, 11.0, 0.3, 0.7) * 255.0
}

/// Dot edge length in canvas pixels, `1 + floor(density% / 20)`
pub fn dot_size(density_percent: f64) -> u32 {
    (density_percent.clamp(0.0, 100.0) / 20.0).floor() as u32 + 1
}

/// Brightness of the source resampled to a `columns` x `rows` grid
///
/// The source image is cover-fitted, cropping whichever axis overflows.
/// Without an image a seeded noise pattern stands in.
pub fn luma_grid(columns: usize, rows: usize, source: Option<&RgbaImage>, seed: u64) -> Array2<f64> {
    let columns = columns.max(1);
    let rows = rows.max(1);

    let Some(image) = source else {
        let noise = PerlinNoise::new(seed);
        return Array2::from_shape_fn((rows, columns), |(row, column)| {
            noise.noise(column as f64 * 0.03, row as f64 * 0.03) * 255.0
        });
    };

    let fitted = cover_fit(image, columns as u32, rows as u32);
    Array2::from_shape_fn((rows, columns), |(row, column)| {
        fitted
            .get_pixel_checked(column as u32, row as u32)
            .map_or(0.0, |pixel| Color::from_rgba(*pixel).luma())
    })
}

/// Scales `image` to cover `width` x `height` and crops the centered overflow
pub fn cover_fit(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (source_width, source_height) = image.dimensions();
    if source_width == 0 || source_height == 0 {
        return RgbaImage::new(width, height);
    }
    let scale = (f64::from(width) / f64::from(source_width))
        .max(f64::from(height) / f64::from(source_height));
    let scaled_width = ((f64::from(source_width) * scale).ceil() as u32).max(width);
    let scaled_height = ((f64::from(source_height) * scale).ceil() as u32).max(height);

    let scaled = imageops::resize(image, scaled_width, scaled_height, FilterType::Triangle);
    let x = (scaled_width - width) / 2;
    let y = (scaled_height - height) / 2;
    imageops::crop_imm(&scaled, x, y, width, height).to_image()
}

/// Quantizes `luma` in place and returns the foreground mask in row-major order
///
/// Every output value is either 0 or 255.
pub fn floyd_steinberg(luma: &mut Array2<f64>, threshold: f64) -> BitVec {
    let (rows, columns) = luma.dim();
    let mut ink = bitvec![0; rows * columns];

    for row in 0..rows {
        for column in 0..columns {
            let Some(value) = luma.get_mut((row, column)) else {
                continue;
            };
            let old = *value;
            let lit = old >= threshold;
            let new = if lit { 255.0 } else { 0.0 };
            *value = new;
            ink.set(row * columns + column, lit);

            let error = old - new;
            for ((dr, dc), share) in DIFFUSION {
                let (Some(r), Some(c)) =
                    (row.checked_add_signed(dr), column.checked_add_signed(dc))
                else {
                    continue;
                };
                if let Some(neighbor) = luma.get_mut((r, c)) {
                    *neighbor += error * share;
                }
            }
        }
    }
    ink
}

/// The dithering algorithm
#[derive(Debug, Clone)]
pub struct Dither {
    luma: Array2<f64>,
    dot: u32,
    ink: BitVec,
}

impl Dither {
    /// Samples the source at dot resolution and draws the dithered frame
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let dot = dot_size(ctx.params.density);
        let columns = canvas.width().div_ceil(dot) as usize;
        let rows = canvas.height().div_ceil(dot) as usize;
        let luma = luma_grid(columns, rows, ctx.source, seed);
        debug!(columns, rows, dot, "dither grid sampled");

        let mut generator = Self {
            luma,
            dot,
            ink: BitVec::new(),
        };
        generator.render(canvas, ctx);
        generator
    }

    /// Foreground mask of the last render, row-major over the dot grid
    pub fn ink(&self) -> &BitVec {
        &self.ink
    }

    /// Dot edge length in canvas pixels
    pub const fn dot(&self) -> u32 {
        self.dot
    }

    fn render(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        let mut work = self.luma.clone();
        self.ink = floyd_steinberg(&mut work, threshold(ctx.normalized.complexity));
        paint_dots(canvas, ctx.colors, &self.ink, self.luma.ncols(), self.dot);
    }
}

fn paint_dots(canvas: &mut MasterCanvas, colors: &ColorSet, ink: &BitVec, columns: usize, dot: u32) {
    canvas.clear(colors.background);
    let image = canvas.image_mut();
    let size = f64::from(dot);
    for index in ink.iter_ones() {
        let row = index / columns.max(1);
        let column = index % columns.max(1);
        fill_rect(
            image,
            column as f64 * size,
            row as f64 * size,
            size,
            size,
            colors.foreground,
        );
    }
}

impl Generator for Dither {
    fn tick(&mut self, _canvas: &mut MasterCanvas, _ctx: &TickContext<'_>) -> TickOutcome {
        TickOutcome::Idle
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.render(canvas, ctx);
    }
}
