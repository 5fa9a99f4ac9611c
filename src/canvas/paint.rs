//! Software rasterization primitives over RGBA buffers
//!
//! All shapes are composited with source-over alpha blending and clipped to
//! the buffer, so callers may pass coordinates outside the canvas.

use crate::color::palette::Color;
use image::{Rgba, RgbaImage};

/// Composites `src` over `dst` with source-over alpha blending
pub fn blend(dst: Rgba<u8>, src: Color) -> Rgba<u8> {
    match src.a {
        0 => dst,
        255 => src.to_rgba(),
        _ => {
            let sa = f32::from(src.a) / 255.0;
            let da = f32::from(dst.0[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            if out_a <= f32::EPSILON {
                return Rgba([0, 0, 0, 0]);
            }
            let channel = |s: u8, d: u8| {
                let value = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(src.r, dst.0[0]),
                channel(src.g, dst.0[1]),
                channel(src.b, dst.0[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ])
        }
    }
}

/// Blends one pixel, ignoring coordinates outside the buffer
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Color) {
    let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
        *pixel = blend(*pixel, color);
    }
}

/// Replaces every pixel with `color`
pub fn fill(img: &mut RgbaImage, color: Color) {
    let value = color.to_rgba();
    for pixel in img.pixels_mut() {
        *pixel = value;
    }
}

/// Blends `color` over every pixel
///
/// With a low alpha this slowly fades accumulated drawing towards `color`.
pub fn wash(img: &mut RgbaImage, color: Color) {
    for pixel in img.pixels_mut() {
        *pixel = blend(*pixel, color);
    }
}

/// Clamped pixel span `[start, end)` covering `[min, max]`
fn span(min: f64, max: f64, limit: u32) -> Option<(u32, u32)> {
    if !(min.is_finite() && max.is_finite()) || max < 0.0 || min >= f64::from(limit) {
        return None;
    }
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil().max(0.0) as u32).min(limit);
    (start < end).then_some((start, end))
}

/// Fills an axis-aligned rectangle given by its top-left corner and size
pub fn fill_rect(img: &mut RgbaImage, x: f64, y: f64, width: f64, height: f64, color: Color) {
    let Some((x0, x1)) = span(x.round(), (x + width).round(), img.width()) else {
        return;
    };
    let Some((y0, y1)) = span(y.round(), (y + height).round(), img.height()) else {
        return;
    };
    for py in y0..y1 {
        for px in x0..x1 {
            if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
                *pixel = blend(*pixel, color);
            }
        }
    }
}

/// Fills a disc, sampling pixel centers
pub fn fill_circle(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Color) {
    let radius = radius.max(0.5);
    let Some((x0, x1)) = span(cx - radius, cx + radius, img.width()) else {
        return;
    };
    let Some((y0, y1)) = span(cy - radius, cy + radius, img.height()) else {
        return;
    };
    let r2 = radius * radius;
    for py in y0..y1 {
        let dy = f64::from(py) + 0.5 - cy;
        for px in x0..x1 {
            let dx = f64::from(px) + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
                    *pixel = blend(*pixel, color);
                }
            }
        }
    }
}

/// Fills a convex polygon with a scanline sweep
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f64, f64)], color: Color) {
    if points.len() < 3 {
        return;
    }
    let (min_y, max_y) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    let Some((y0, y1)) = span(min_y, max_y, img.height()) else {
        return;
    };

    for py in y0..y1 {
        let sample_y = f64::from(py) + 0.5;
        let mut left = f64::INFINITY;
        let mut right = f64::NEG_INFINITY;

        for (index, &(ax, ay)) in points.iter().enumerate() {
            let Some(&(bx, by)) = points.get((index + 1) % points.len()) else {
                continue;
            };
            let crosses = (ay <= sample_y && by > sample_y) || (by <= sample_y && ay > sample_y);
            if crosses {
                let x = ax + (sample_y - ay) / (by - ay) * (bx - ax);
                left = left.min(x);
                right = right.max(x);
            }
        }

        // Pixels whose centers fall inside [left, right]
        let Some((x0, x1)) = span((left - 0.5).ceil(), (right - 0.5).floor() + 1.0, img.width())
        else {
            continue;
        };
        for px in x0..x1 {
            if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
                *pixel = blend(*pixel, color);
            }
        }
    }
}

/// Draws a line segment of the given width with round caps
///
/// Every covered pixel is blended exactly once, so translucent strokes do
/// not darken where caps and body overlap.
pub fn stroke_line(
    img: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    color: Color,
) {
    let radius = (width / 2.0).max(0.5);
    let (ax, ay) = from;
    let (bx, by) = to;
    let Some((x0, x1)) = span(ax.min(bx) - radius, ax.max(bx) + radius, img.width()) else {
        return;
    };
    let Some((y0, y1)) = span(ay.min(by) - radius, ay.max(by) + radius, img.height()) else {
        return;
    };

    let (dx, dy) = (bx - ax, by - ay);
    let length_sq = dx * dx + dy * dy;
    let r2 = radius * radius;

    for py in y0..y1 {
        let sy = f64::from(py) + 0.5;
        for px in x0..x1 {
            let sx = f64::from(px) + 0.5;
            let t = if length_sq > 0.0 {
                (((sx - ax) * dx + (sy - ay) * dy) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (nx, ny) = (ax + dx * t - sx, ay + dy * t - sy);
            if nx * nx + ny * ny <= r2 {
                if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
                    *pixel = blend(*pixel, color);
                }
            }
        }
    }
}

/// Draws `src` over `dst` at an offset, scaling the source alpha by `opacity`
pub fn overlay(dst: &mut RgbaImage, src: &RgbaImage, offset_x: i64, offset_y: i64, opacity: u8) {
    for (x, y, pixel) in src.enumerate_pixels() {
        let alpha = (u16::from(pixel.0[3]) * u16::from(opacity) / 255) as u8;
        let color = Color::from_rgba(*pixel).with_alpha(alpha);
        blend_pixel(dst, i64::from(x) + offset_x, i64::from(y) + offset_y, color);
    }
}
