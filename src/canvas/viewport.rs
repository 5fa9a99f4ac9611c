//! Mapping between the master canvas and the fixed-size preview surface

use crate::canvas::paint;
use crate::color::palette::Color;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Rectangle from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `width` by `height` centered inside `outer_width` by `outer_height`
    ///
    /// The size is clamped to the outer bounds.
    pub fn centered(width: u32, height: u32, outer_width: u32, outer_height: u32) -> Self {
        let width = width.min(outer_width);
        let height = height.min(outer_height);
        Self::new(
            (outer_width - width) / 2,
            (outer_height - height) / 2,
            width,
            height,
        )
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// How the canvas is placed on the preview surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMapping {
    /// Preview pixels per canvas pixel
    pub scale: f64,
    /// Canvas region that is shown
    pub source: Region,
    /// Where that region lands on the preview surface
    pub destination: Region,
}

/// Fixed preview resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Preview width in pixels
    pub width: u32,
    /// Preview height in pixels
    pub height: u32,
}

impl Viewport {
    /// Preview surface of the given size, at least one pixel each way
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Uniform preview scale for a canvas of `canvas_width`
    pub fn scale_for(&self, canvas_width: u32) -> f64 {
        f64::from(self.width) / f64::from(canvas_width.max(1))
    }

    /// Centered canvas region visible at the preview scale
    ///
    /// Equal to `min(viewport / scale, canvas)` on each axis, which is the
    /// same window the exporter crops from.
    pub fn visible_region(&self, canvas_width: u32, canvas_height: u32) -> Region {
        let scale = self.scale_for(canvas_width);
        let width = (f64::from(self.width) / scale)
            .round()
            .min(f64::from(canvas_width)) as u32;
        let height = (f64::from(self.height) / scale)
            .round()
            .min(f64::from(canvas_height)) as u32;
        Region::centered(width.max(1), height.max(1), canvas_width, canvas_height)
    }

    /// Placement of a canvas on the preview surface
    ///
    /// Synthetic canvases show their visible region scaled to the viewport
    /// width. Image canvases are letterboxed: scaled to fit entirely and
    /// centered.
    pub fn mapping(&self, canvas_width: u32, canvas_height: u32, letterbox: bool) -> ViewMapping {
        let canvas_width = canvas_width.max(1);
        let canvas_height = canvas_height.max(1);

        if letterbox {
            let scale = (f64::from(self.width) / f64::from(canvas_width))
                .min(f64::from(self.height) / f64::from(canvas_height));
            let width = ((f64::from(canvas_width) * scale).round() as u32).clamp(1, self.width);
            let height = ((f64::from(canvas_height) * scale).round() as u32).clamp(1, self.height);
            return ViewMapping {
                scale,
                source: Region::new(0, 0, canvas_width, canvas_height),
                destination: Region::centered(width, height, self.width, self.height),
            };
        }

        let scale = self.scale_for(canvas_width);
        let source = self.visible_region(canvas_width, canvas_height);
        let width = ((f64::from(source.width) * scale).round() as u32).clamp(1, self.width);
        let height = ((f64::from(source.height) * scale).round() as u32).clamp(1, self.height);
        ViewMapping {
            scale,
            source,
            destination: Region::centered(width, height, self.width, self.height),
        }
    }

    /// Renders the preview frame for a canvas
    pub fn present(&self, canvas: &RgbaImage, letterbox: bool, background: Color) -> RgbaImage {
        let mapping = self.mapping(canvas.width(), canvas.height(), letterbox);
        let mut frame = RgbaImage::new(self.width, self.height);
        paint::fill(&mut frame, background);

        let source = imageops::crop_imm(
            canvas,
            mapping.source.x,
            mapping.source.y,
            mapping.source.width,
            mapping.source.height,
        )
        .to_image();
        let scaled = imageops::resize(
            &source,
            mapping.destination.width,
            mapping.destination.height,
            FilterType::Triangle,
        );
        paint::overlay(
            &mut frame,
            &scaled,
            i64::from(mapping.destination.x),
            i64::from(mapping.destination.y),
            255,
        );
        frame
    }
}
