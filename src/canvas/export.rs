//! Export rasters cut from the master canvas at arbitrary output sizes

use crate::canvas::glyphs::{GLYPH_HEIGHT, draw_text};
use crate::canvas::paint::{self, fill_rect};
use crate::canvas::viewport::{Region, Viewport};
use crate::color::palette::Color;
use crate::io::configuration::{
    JPEG_HIGH_QUALITY, JPEG_STANDARD_QUALITY, MAX_EXPORT_DIMENSION, METADATA_ALPHA,
    METADATA_MARGIN, METADATA_MIN_HEIGHT, METADATA_MIN_WIDTH,
};
use crate::io::error::{Result, WallgenError, invalid_parameter};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Validated output dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSize {
    width: u32,
    height: u32,
}

impl ExportSize {
    /// Validates requested dimensions
    ///
    /// # Errors
    ///
    /// Returns [`WallgenError::UnsupportedExportSize`] if either dimension is
    /// non-finite, below one pixel or above the export limit.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let reject = |reason| {
            Err(WallgenError::UnsupportedExportSize {
                width,
                height,
                reason,
            })
        };
        if !(width.is_finite() && height.is_finite()) {
            return reject("dimensions must be finite");
        }
        if width < 1.0 || height < 1.0 {
            return reject("dimensions must be at least one pixel");
        }
        if width > MAX_EXPORT_DIMENSION || height > MAX_EXPORT_DIMENSION {
            return reject("dimensions exceed the export limit");
        }
        Ok(Self {
            width: width.round() as u32,
            height: height.round() as u32,
        })
    }

    /// Output width
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Output height
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// File container requested for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Lossless PNG
    #[default]
    Png,
    /// JPEG, quality depends on the high quality flag
    Jpeg,
}

impl ExportFormat {
    /// Conventional file extension
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = WallgenError;

    /// Accepts `png`, `jpg`, `jpeg`; `svg` is rasterized to PNG
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "svg" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(invalid_parameter(
                "format",
                &other,
                &"expected png, jpg or svg",
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the visible canvas region is fitted to the output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFit {
    /// Copy a centered window 1:1, padding any shortfall with the background
    #[default]
    Crop,
    /// Resample the visible region so it covers the whole output
    Scale,
}

impl FromStr for ExportFit {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crop" => Ok(Self::Crop),
            "scale" => Ok(Self::Scale),
            other => Err(invalid_parameter("fit", &other, &"expected crop or scale")),
        }
    }
}

/// Parameters of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Output dimensions, ignored for image-based algorithms
    pub size: ExportSize,
    /// Container format
    pub format: ExportFormat,
    /// Smooth resampling and higher JPEG quality
    pub high_quality: bool,
    /// Composite the algorithm name into a corner
    pub include_metadata: bool,
    /// Crop or scale the visible region
    pub fit: ExportFit,
    /// Suggested file name, derived from the algorithm when absent
    pub filename: Option<String>,
}

impl ExportRequest {
    /// High quality PNG crop without metadata
    pub const fn new(size: ExportSize) -> Self {
        Self {
            size,
            format: ExportFormat::Png,
            high_quality: true,
            include_metadata: false,
            fit: ExportFit::Crop,
            filename: None,
        }
    }
}

/// A finished raster ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedRaster {
    /// Pixels to encode
    pub image: RgbaImage,
    /// Container format
    pub format: ExportFormat,
    /// JPEG quality in percent, unused for PNG
    pub quality: u8,
    /// File name including extension
    pub filename: String,
}

/// Canvas geometry of a crop export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    /// Canvas region visible in the preview
    pub visible: Region,
    /// Canvas region copied into the output
    pub crop: Region,
    /// Top-left corner of the copied region in the output
    pub offset: (u32, u32),
}

/// Centered crop of the visible region for a target size
pub fn crop_geometry(
    canvas_width: u32,
    canvas_height: u32,
    viewport: &Viewport,
    size: ExportSize,
) -> CropGeometry {
    let visible = viewport.visible_region(canvas_width, canvas_height);
    let crop = Region::centered(
        size.width().min(visible.width),
        size.height().min(visible.height),
        canvas_width,
        canvas_height,
    );
    CropGeometry {
        visible,
        crop,
        offset: (
            (size.width() - crop.width) / 2,
            (size.height() - crop.height) / 2,
        ),
    }
}

/// Everything needed to cut an export from a canvas
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    /// Canvas pixels
    pub canvas: &'a RgbaImage,
    /// Preview surface the visible region is derived from
    pub viewport: &'a Viewport,
    /// Export the canvas unscaled
    pub image_based: bool,
    /// Padding color
    pub background: Color,
    /// Display name for metadata and file names
    pub algorithm_name: &'a str,
}

/// Produces the raster for an export request
pub fn export_raster(source: &ExportSource<'_>, request: &ExportRequest) -> ExportedRaster {
    let mut image = if source.image_based {
        source.canvas.clone()
    } else {
        match request.fit {
            ExportFit::Crop => crop_to_target(source, request.size),
            ExportFit::Scale => scale_to_target(source, request.size, request.high_quality),
        }
    };

    if request.include_metadata {
        draw_metadata(&mut image, source.algorithm_name);
    }

    let quality = if request.high_quality {
        JPEG_HIGH_QUALITY
    } else {
        JPEG_STANDARD_QUALITY
    };

    let filename = request.filename.clone().unwrap_or_else(|| {
        format!(
            "wallgen-{}.{}",
            source.algorithm_name.to_ascii_lowercase().replace(' ', "-"),
            request.format.extension()
        )
    });

    ExportedRaster {
        image,
        format: request.format,
        quality,
        filename,
    }
}

fn crop_to_target(source: &ExportSource<'_>, size: ExportSize) -> RgbaImage {
    let (canvas_width, canvas_height) = source.canvas.dimensions();
    let geometry = crop_geometry(canvas_width, canvas_height, source.viewport, size);
    debug!(
        crop = ?geometry.crop,
        offset = ?geometry.offset,
        "cropping export"
    );

    let mut target = RgbaImage::new(size.width(), size.height());
    paint::fill(&mut target, source.background);

    let region = imageops::crop_imm(
        source.canvas,
        geometry.crop.x,
        geometry.crop.y,
        geometry.crop.width,
        geometry.crop.height,
    )
    .to_image();
    paint::overlay(
        &mut target,
        &region,
        i64::from(geometry.offset.0),
        i64::from(geometry.offset.1),
        255,
    );
    target
}

fn scale_to_target(source: &ExportSource<'_>, size: ExportSize, high_quality: bool) -> RgbaImage {
    let (canvas_width, canvas_height) = source.canvas.dimensions();
    let visible = source.viewport.visible_region(canvas_width, canvas_height);

    let cover = (f64::from(size.width()) / f64::from(visible.width))
        .max(f64::from(size.height()) / f64::from(visible.height));
    let window_width = ((f64::from(size.width()) / cover).round() as u32).clamp(1, visible.width);
    let window_height =
        ((f64::from(size.height()) / cover).round() as u32).clamp(1, visible.height);
    let inner = Region::centered(window_width, window_height, visible.width, visible.height);

    let region = imageops::crop_imm(
        source.canvas,
        visible.x + inner.x,
        visible.y + inner.y,
        inner.width,
        inner.height,
    )
    .to_image();

    let filter = if high_quality {
        FilterType::Lanczos3
    } else {
        FilterType::Nearest
    };
    debug!(window = ?inner, ?filter, "scaling export");

    let mut target = RgbaImage::new(size.width(), size.height());
    paint::fill(&mut target, source.background);
    let scaled = imageops::resize(&region, size.width(), size.height(), filter);
    paint::overlay(&mut target, &scaled, 0, 0, 255);
    target
}

/// Composites a translucent strip naming the algorithm into the bottom-left corner
pub fn draw_metadata(image: &mut RgbaImage, algorithm_name: &str) {
    let (width, height) = image.dimensions();
    let strip_height = METADATA_MIN_HEIGHT.max(height / 30);
    let strip_width = METADATA_MIN_WIDTH.max(width / 7);
    let font_size = 10.0_f64.max(f64::from(strip_height) * 0.5);
    let scale = (font_size / f64::from(GLYPH_HEIGHT)).floor().max(1.0);

    let left = f64::from(METADATA_MARGIN);
    let top = f64::from(height) - f64::from(strip_height) - f64::from(METADATA_MARGIN);

    fill_rect(
        image,
        left,
        top,
        f64::from(strip_width),
        f64::from(strip_height),
        Color::BLACK.with_alpha(METADATA_ALPHA),
    );

    let text = format!("ALGORITHM: {} | WALLGEN", algorithm_name.to_ascii_uppercase());
    let text_top = top + (f64::from(strip_height) - f64::from(GLYPH_HEIGHT) * scale) / 2.0;
    draw_text(image, &text, left + scale * 2.0, text_top, scale, Color::WHITE);
}
