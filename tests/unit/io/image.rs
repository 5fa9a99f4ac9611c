//! Tests for source decoding and raster encoding

#[cfg(test)]
mod tests {
    use ::image::{Rgba, RgbaImage};
    use wallgen::canvas::export::{ExportFormat, ExportedRaster};
    use wallgen::io::error::WallgenError;
    use wallgen::io::image::{decode_bytes, decode_file, save_raster};

    fn raster(format: ExportFormat) -> ExportedRaster {
        let image = RgbaImage::from_fn(12, 9, |x, y| Rgba([(x * 20) as u8, (y * 25) as u8, 90, 255]));
        ExportedRaster {
            image,
            format,
            quality: 90,
            filename: format!("test.{}", format.extension()),
        }
    }

    // Tests PNG output decodes back to identical pixels
    // Verified by encoding through the lossy path
    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("er").join("wall.png");
        let original = raster(ExportFormat::Png);

        let written = save_raster(&original, &path).unwrap();
        assert_eq!(written, path);

        let decoded = decode_file(&path).unwrap();
        assert_eq!(decoded, original.image);
    }

    // Tests JPEG output is written opaque at the raster size
    // Verified by writing PNG bytes under a JPEG name
    #[test]
    fn test_jpeg_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.jpg");
        save_raster(&raster(ExportFormat::Jpeg), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));

        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (12, 9));
        assert!(decoded.pixels().all(|p| p.0[3] == 255));
    }

    // Tests undecodable bytes and missing files map to distinct errors
    // Verified by reporting missing files as decode failures
    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_bytes(b"not an image"),
            Err(WallgenError::ImageDecodeFailure { .. })
        ));
        assert!(matches!(decode_bytes(&[]), Err(WallgenError::ImageDecodeFailure { .. })));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(decode_file(&missing), Err(WallgenError::FileSystem { .. })));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"garbage").unwrap();
        assert!(matches!(
            decode_file(&garbage),
            Err(WallgenError::ImageDecodeFailure { .. })
        ));
    }
}
