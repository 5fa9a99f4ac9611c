//! Tests for master canvas allocation and clearing

#[cfg(test)]
mod tests {
    use image::RgbaImage;
    use wallgen::canvas::master::MasterCanvas;
    use wallgen::color::palette::Color;

    // Tests new canvases are transparent and at least one pixel
    // Verified by allocating zero-sized buffers
    #[test]
    fn test_new_canvas() {
        let canvas = MasterCanvas::square(8);
        assert_eq!(canvas.dimensions(), (8, 8));
        assert_eq!(canvas.pixel(3, 3), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(8, 0), None);

        let degenerate = MasterCanvas::new(0, 0);
        assert_eq!((degenerate.width(), degenerate.height()), (1, 1));
    }

    // Tests resize discards content in both the same-size and new-size paths
    // Verified by skipping the clear when the size is unchanged
    #[test]
    fn test_resize_discards_content() {
        let mut canvas = MasterCanvas::new(4, 3);
        canvas.clear(Color::WHITE);

        canvas.resize(4, 3);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));

        canvas.clear(Color::WHITE);
        canvas.resize(10, 2);
        assert_eq!(canvas.dimensions(), (10, 2));
        assert_eq!(canvas.pixel(9, 1), Some(Color::TRANSPARENT));
    }

    // Tests buffers can be wrapped, mutated and taken back
    // Verified by cloning in image_mut
    #[test]
    fn test_buffer_access() {
        let mut canvas = MasterCanvas::from_image(RgbaImage::new(2, 2));
        canvas.image_mut().put_pixel(1, 0, Color::WHITE.to_rgba());
        assert_eq!(canvas.pixel(1, 0), Some(Color::WHITE));

        let image = canvas.into_image();
        assert_eq!(image.get_pixel(1, 0), &Color::WHITE.to_rgba());
    }
}
