//! Image-sampled flow-field plotter
//!
//! Each tick scatters directional strokes over the canvas. A stroke takes
//! its color from the source image at its starting point and its heading
//! from a noise field, so the picture is rebuilt out of strokes that appear
//! to follow invisible currents. Strokes start wide and sparse and end thin
//! and numerous; the whole effect completes within a fixed tick budget.

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::canvas::paint::{overlay, stroke_line};
use crate::color::palette::{Color, ColorSet};
use crate::io::configuration::{
    FLOW_BASE_STROKE_LENGTH, FLOW_END_THICKNESS, FLOW_FILLER_INTERVAL, FLOW_MAX_SAMPLE_PIXELS,
    FLOW_MICRO_INTERVAL, FLOW_MICRO_MEGAPIXELS, FLOW_OVERLAY_ALPHA, FLOW_OVERLAY_INTERVAL,
    FLOW_START_THICKNESS, FLOW_BASE_STROKES, FLOW_TICK_BUDGET,
};
use crate::math::interpolation::{lerp, map_range};
use crate::math::noise::PerlinNoise;
use crate::params::parameters::ParameterSet;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::{debug, info};

/// Source pixels prepared for sampling
///
/// Images above the sampling limit are downscaled; lookups still take
/// coordinates in the native resolution.
#[derive(Debug, Clone)]
pub struct FlowSource {
    sample: RgbaImage,
    native: (u32, u32),
}

impl FlowSource {
    /// Prepares an image for sampling
    pub fn new(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let area = u64::from(width) * u64::from(height);
        let sample = if area > FLOW_MAX_SAMPLE_PIXELS {
            let factor = (FLOW_MAX_SAMPLE_PIXELS as f64 / area as f64).sqrt();
            let sample_width = ((f64::from(width) * factor).round() as u32).max(1);
            let sample_height = ((f64::from(height) * factor).round() as u32).max(1);
            debug!(
                width,
                height, sample_width, sample_height, "downscaling flow source for sampling"
            );
            imageops::resize(image, sample_width, sample_height, FilterType::Triangle)
        } else {
            image.clone()
        };
        Self {
            sample,
            native: (width.max(1), height.max(1)),
        }
    }

    /// Native dimensions
    pub const fn dimensions(&self) -> (u32, u32) {
        self.native
    }

    /// Dimensions of the buffer actually sampled
    pub fn sample_dimensions(&self) -> (u32, u32) {
        self.sample.dimensions()
    }

    /// Native area in megapixels
    pub fn megapixels(&self) -> f64 {
        f64::from(self.native.0) * f64::from(self.native.1) / 1_000_000.0
    }

    /// Color at a native-resolution position, clamped to the edges
    pub fn sample(&self, x: f64, y: f64) -> Color {
        let (sw, sh) = self.sample.dimensions();
        let sx = (x / f64::from(self.native.0) * f64::from(sw)).floor();
        let sy = (y / f64::from(self.native.1) * f64::from(sh)).floor();
        let px = sx.clamp(0.0, f64::from(sw.saturating_sub(1))) as u32;
        let py = sy.clamp(0.0, f64::from(sh.saturating_sub(1))) as u32;
        self.sample
            .get_pixel_checked(px, py)
            .copied()
            .map_or(Color::WHITE, Color::from_rgba)
    }
}

/// Seeded stand-in for a missing source image
///
/// Smooth noise bands blending from the background through every drawing
/// color.
pub fn procedural_source(width: u32, height: u32, colors: &ColorSet, seed: u64) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let noise = PerlinNoise::new(seed);

    let mut stops = vec![colors.background];
    stops.extend(colors.drawing_colors());

    let small_width = (width / 4).max(1);
    let small_height = (height / 4).max(1);
    let mut small = RgbaImage::new(small_width, small_height);
    let last = (stops.len() - 1) as f64;

    for (x, y, pixel) in small.enumerate_pixels_mut() {
        let value = noise.noise(f64::from(x) * 0.012, f64::from(y) * 0.012);
        let position = (value * last).clamp(0.0, last);
        let lower = position.floor();
        let from = stops.get(lower as usize).copied().unwrap_or(colors.background);
        let to = stops
            .get((lower as usize + 1).min(stops.len() - 1))
            .copied()
            .unwrap_or(from);
        *pixel = from.lerp(to, position - lower).with_alpha(255).to_rgba();
    }

    imageops::resize(&small, width, height, FilterType::Triangle)
}

/// `1 + ln(1 + megapixels)`, the sub-linear resolution factor
pub fn megapixel_factor(megapixels: f64) -> f64 {
    1.0 + megapixels.max(0.0).ln_1p()
}

/// Fraction of the budget elapsed, in `[0, 1]`
pub fn progress(tick: u64) -> f64 {
    (tick as f64 / FLOW_TICK_BUDGET as f64).clamp(0.0, 1.0)
}

/// Stroke width at a tick, tapering from wide to thin
pub fn stroke_width(tick: u64, megapixels: f64, multiplier: f64) -> f64 {
    let taper = lerp(FLOW_START_THICKNESS, FLOW_END_THICKNESS, progress(tick));
    (taper * multiplier * megapixel_factor(megapixels).sqrt()).max(1.0)
}

/// Extra density applied early in the budget
///
/// Starts at `1 + 0.5 * megapixel_factor` and falls to 1 by the end of the
/// budget.
pub fn density_multiplier(tick: u64, megapixels: f64) -> f64 {
    1.0 + 0.5 * (1.0 - progress(tick)) * megapixel_factor(megapixels)
}

/// Main-pass strokes drawn at a tick
///
/// Grows with the logarithm of the image area. The filler pass covers what
/// the main pass leaves open on large images.
pub fn strokes_per_tick(tick: u64, megapixels: f64, density_factor: f64) -> usize {
    let base = FLOW_BASE_STROKES * megapixel_factor(megapixels) * density_factor.max(0.1);
    let ramp = map_range(progress(tick), 0.0, 1.0, 0.6, 1.0);
    (base * ramp * density_multiplier(tick, megapixels)).round().max(1.0) as usize
}

/// Noise frequency for stroke headings, `noise% / 100 * 0.002 + 0.0001`
pub fn heading_scale(noise_percent: f64) -> f64 {
    noise_percent.clamp(0.0, 100.0) / 100.0 * 0.002 + 0.0001
}

/// One stroke, derived from a source position at draw time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    /// Start point
    pub from: (f64, f64),
    /// End point
    pub to: (f64, f64),
    /// Stroke width
    pub width: f64,
    /// Stroke color
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tuning {
    base_length: f64,
    thickness_multiplier: f64,
    density_factor: f64,
    heading_scale: f64,
}

impl Tuning {
    fn from_params(params: &ParameterSet) -> Self {
        Self {
            base_length: params.stroke_length.unwrap_or(FLOW_BASE_STROKE_LENGTH),
            thickness_multiplier: params.stroke_thickness.unwrap_or(1.0),
            density_factor: params.density / 50.0,
            heading_scale: heading_scale(params.noise_scale),
        }
    }
}

/// The flow-field plotter algorithm
#[derive(Debug, Clone)]
pub struct FlowPlot {
    source: FlowSource,
    backdrop: RgbaImage,
    noise: PerlinNoise,
    rng: StdRng,
    tuning: Tuning,
    tick: u64,
    finished: bool,
}

impl FlowPlot {
    /// Prepares sampling and clears the canvas to white
    ///
    /// Uses the context's source image, or a procedural pattern of the
    /// canvas size when none is loaded.
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, seed: u64) -> Self {
        let backdrop = ctx.source.cloned().unwrap_or_else(|| {
            info!("no source image, plotting a procedural pattern");
            procedural_source(canvas.width(), canvas.height(), ctx.colors, seed)
        });
        let source = FlowSource::new(&backdrop);
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = PerlinNoise::new(rng.random());

        canvas.clear(Color::WHITE);
        debug!(
            megapixels = source.megapixels(),
            factor = megapixel_factor(source.megapixels()),
            "flow plotter initialized"
        );

        Self {
            source,
            backdrop,
            noise,
            rng,
            tuning: Tuning::from_params(ctx.params),
            tick: 0,
            finished: false,
        }
    }

    /// Ticks drawn so far
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Sampling source
    pub const fn source(&self) -> &FlowSource {
        &self.source
    }

    fn heading(&self, x: f64, y: f64) -> f64 {
        let value = self
            .noise
            .noise(x * self.tuning.heading_scale, y * self.tuning.heading_scale);
        map_range(value, 0.0, 1.0, -PI, PI)
    }

    fn random_point(&mut self) -> (f64, f64) {
        let (width, height) = self.source.dimensions();
        (
            self.rng.random_range(0.0..f64::from(width)),
            self.rng.random_range(0.0..f64::from(height)),
        )
    }

    /// Stroke starting at `(x, y)` with the given width and length
    pub fn stroke_at(&self, x: f64, y: f64, width: f64, length: f64, alpha: u8) -> StrokeSample {
        let angle = self.heading(x, y);
        StrokeSample {
            from: (x, y),
            to: (x + angle.cos() * length, y + angle.sin() * length),
            width,
            color: self.source.sample(x, y).with_alpha(alpha),
        }
    }

    fn draw(canvas: &mut RgbaImage, stroke: &StrokeSample) {
        stroke_line(canvas, stroke.from, stroke.to, stroke.width, stroke.color);
    }

    fn main_pass(&mut self, canvas: &mut RgbaImage) {
        let megapixels = self.source.megapixels();
        let width = stroke_width(self.tick, megapixels, self.tuning.thickness_multiplier);
        let length_scale = megapixel_factor(megapixels).sqrt();
        let count = strokes_per_tick(self.tick, megapixels, self.tuning.density_factor);

        for _ in 0..count {
            let (x, y) = self.random_point();
            let length = self.tuning.base_length * self.rng.random_range(1.0..1.8) * length_scale;
            let alpha = self.rng.random_range(180..=255);
            let stroke = self.stroke_at(x, y, width, length, alpha);
            Self::draw(canvas, &stroke);

            if width > 1.5 {
                let highlight = StrokeSample {
                    from: (stroke.from.0 - width * 0.1, stroke.from.1 - width * 0.1),
                    to: (stroke.to.0 - width * 0.1, stroke.to.1 - width * 0.1),
                    width: width * 0.8,
                    color: stroke
                        .color
                        .scaled(1.5, 1.5, 1.5)
                        .with_alpha(self.rng.random_range(50..150)),
                };
                Self::draw(canvas, &highlight);
            }
        }
    }

    fn filler_pass(&mut self, canvas: &mut RgbaImage) {
        let megapixels = self.source.megapixels();
        let width = stroke_width(self.tick, megapixels, self.tuning.thickness_multiplier) * 1.5;
        let spacing = (width * 2.0).max(4.0);
        let (image_width, image_height) = self.source.dimensions();

        let mut y = spacing / 2.0;
        while y < f64::from(image_height) {
            let mut x = spacing / 2.0;
            while x < f64::from(image_width) {
                let jitter_x = self.rng.random_range(-spacing / 2.0..spacing / 2.0);
                let jitter_y = self.rng.random_range(-spacing / 2.0..spacing / 2.0);
                let stroke =
                    self.stroke_at(x + jitter_x, y + jitter_y, width, self.tuning.base_length, 60);
                Self::draw(canvas, &stroke);
                x += spacing;
            }
            y += spacing;
        }
    }

    fn micro_pass(&mut self, canvas: &mut RgbaImage) {
        let megapixels = self.source.megapixels();
        let count = strokes_per_tick(self.tick, megapixels, self.tuning.density_factor) / 4;
        for _ in 0..count {
            let (x, y) = self.random_point();
            let stroke = self.stroke_at(x, y, 1.0, self.tuning.base_length / 3.0, 220);
            Self::draw(canvas, &stroke);
        }
    }
}

impl Generator for FlowPlot {
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome {
        if self.finished && !ctx.capturing {
            return TickOutcome::Idle;
        }

        let image = canvas.image_mut();
        self.main_pass(image);

        if self.tick % FLOW_FILLER_INTERVAL == 0 {
            self.filler_pass(image);
        }
        if progress(self.tick) < 0.6 && self.tick % FLOW_OVERLAY_INTERVAL == 0 {
            overlay(image, &self.backdrop, 0, 0, FLOW_OVERLAY_ALPHA);
        }
        if self.source.megapixels() > FLOW_MICRO_MEGAPIXELS && self.tick % FLOW_MICRO_INTERVAL == 0
        {
            self.micro_pass(image);
        }

        self.tick += 1;
        if !self.finished && self.tick >= FLOW_TICK_BUDGET {
            self.finished = true;
            info!(ticks = self.tick, "flow plot finished");
            return TickOutcome::Finished;
        }
        TickOutcome::Drawn
    }

    fn refresh(&mut self, _canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.tuning = Tuning::from_params(ctx.params);
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
