//! Animated two-color gradient bands
//!
//! A per-pixel port of a fragment shader: a vertical blend between two
//! colors, brightened inside a wobbling arch centered at the bottom edge and
//! darkened towards the bottom by a linear ramp.

use crate::algorithm::kind::{Generator, TickContext, TickOutcome};
use crate::canvas::master::MasterCanvas;
use crate::color::palette::{Color, ColorSet};
use crate::io::configuration::PREVIEW_FRAME_RATE;
use crate::math::interpolation::{fract, lerp, smoothstep};

fn unit_to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The two blend endpoints: first accent or foreground, second accent or
/// background
pub fn endpoints(colors: &ColorSet) -> (Color, Color) {
    let first = colors
        .foreground_palette
        .first()
        .copied()
        .unwrap_or(colors.foreground);
    let second = colors
        .foreground_palette
        .get(1)
        .copied()
        .unwrap_or(colors.background);
    (first, second)
}

/// Seconds of animation time added per tick for a speed percentage
pub fn time_step(speed_percent: f64, capturing: bool) -> f64 {
    let step = speed_percent / 50.0 / f64::from(PREVIEW_FRAME_RATE);
    if capturing { step * 2.0 } else { step }
}

/// Shaded color at normalized coordinates, `v` growing upwards
pub fn shade(first: [f32; 3], second: [f32; 3], u: f32, v: f32, time: f32) -> [f32; 3] {
    let qx = u - 0.5;
    let qy = v;
    let r = arch_radius(qx, qy, time);
    let glow = smoothstep(r + 0.1, r.sin() * 0.5 + 0.2, qx.hypot(qy));
    let ramp = fract(v);
    [0, 1, 2].map(|channel| {
        let base = lerp(
            first.get(channel).copied().unwrap_or(0.0),
            second.get(channel).copied().unwrap_or(0.0),
            v,
        );
        (base + glow) * ramp
    })
}

fn arch_radius(qx: f32, qy: f32, time: f32) -> f32 {
    let wobble = 0.25 * time.sin() * 2.0 * (10.0 * qx + 1.0).cos();
    0.8 + wobble + (0.5 * time * (qy * 0.17)).cos() * 0.1
}

/// The gradient bands algorithm
#[derive(Debug, Clone)]
pub struct GradientBands {
    time: f64,
}

impl GradientBands {
    /// Draws the frame at time zero
    pub fn new(canvas: &mut MasterCanvas, ctx: &TickContext<'_>, _seed: u64) -> Self {
        let generator = Self { time: 0.0 };
        generator.render(canvas, ctx.colors);
        generator
    }

    /// Animation time in seconds
    pub const fn time(&self) -> f64 {
        self.time
    }

    fn render(&self, canvas: &mut MasterCanvas, colors: &ColorSet) {
        let (first, second) = endpoints(colors);
        let first = first.to_unit().map(|c| c as f32);
        let second = second.to_unit().map(|c| c as f32);
        let time = self.time as f32;

        let (width, height) = canvas.dimensions();
        let image = canvas.image_mut();
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;

        // Sample at pixel centers so `v` never reaches 1
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let u = (x as f32 + 0.5) / width;
            let v = 1.0 - (y as f32 + 0.5) / height;
            let [r, g, b] = shade(first, second, u, v, time);
            *pixel = Color::rgb(unit_to_channel(r), unit_to_channel(g), unit_to_channel(b)).to_rgba();
        }
    }
}

impl Generator for GradientBands {
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome {
        self.time += time_step(ctx.params.speed, ctx.capturing);
        self.render(canvas, ctx.colors);
        TickOutcome::Drawn
    }

    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        self.render(canvas, ctx.colors);
    }
}
