//! Source image decoding and export encoding

use crate::canvas::export::{ExportFormat, ExportedRaster};
use crate::io::error::{Result, WallgenError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Decodes an in-memory encoded image into RGBA pixels
///
/// # Errors
///
/// Returns [`WallgenError::ImageDecodeFailure`] if the format is unknown or
/// the data is corrupt
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(|source| {
        WallgenError::ImageDecodeFailure {
            origin: "upload".to_string(),
            source,
        }
    })?;
    debug!(
        width = image.width(),
        height = image.height(),
        "decoded uploaded image"
    );
    Ok(image.to_rgba8())
}

/// Reads and decodes an image file
///
/// # Errors
///
/// Returns [`WallgenError::FileSystem`] if the file cannot be read, or
/// [`WallgenError::ImageDecodeFailure`] if its contents cannot be decoded
pub fn decode_file(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| WallgenError::FileSystem {
        path: path.to_path_buf(),
        operation: "read image",
        source: e,
    })?;
    image::load_from_memory(&bytes)
        .map(|image| image.to_rgba8())
        .map_err(|source| WallgenError::ImageDecodeFailure {
            origin: path.display().to_string(),
            source,
        })
}

/// Writes a finished raster to `path`, creating parent directories
///
/// JPEG output drops the alpha channel and uses the raster's quality.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be created
/// - Encoding fails
pub fn save_raster(raster: &ExportedRaster, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| WallgenError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let export_error = |source| WallgenError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    match raster.format {
        ExportFormat::Png => raster
            .image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(export_error)?,
        ExportFormat::Jpeg => {
            let file = File::create(path).map_err(|e| WallgenError::FileSystem {
                path: path.to_path_buf(),
                operation: "create file",
                source: e,
            })?;
            let rgb = DynamicImage::ImageRgba8(raster.image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), raster.quality);
            encoder.encode_image(&rgb).map_err(export_error)?;
        }
    }

    info!(
        path = %path.display(),
        width = raster.image.width(),
        height = raster.image.height(),
        "raster saved"
    );
    Ok(path.to_path_buf())
}
