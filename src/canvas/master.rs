//! The full-resolution drawing surface owned by the engine

use crate::canvas::paint;
use crate::color::palette::Color;
use image::RgbaImage;
use tracing::debug;

/// Off-screen RGBA buffer every generator draws into
///
/// Square at the master resolution for synthetic algorithms, or the native
/// size of the source image for image-based ones.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterCanvas {
    image: RgbaImage,
}

impl MasterCanvas {
    /// Transparent canvas, each dimension at least one pixel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// Transparent square canvas
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Canvas wrapping an existing buffer
    pub const fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Read access to the pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write access to the pixels
    pub const fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Consumes the canvas, returning its buffer
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Color at a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied().map(Color::from_rgba)
    }

    /// Reallocates at a new size, discarding all content
    ///
    /// Keeps the buffer (cleared) when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.dimensions() == (width, height) {
            self.clear(Color::TRANSPARENT);
            return;
        }
        debug!(width, height, "reallocating master canvas");
        self.image = RgbaImage::new(width, height);
    }

    /// Replaces every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        paint::fill(&mut self.image, color);
    }
}
