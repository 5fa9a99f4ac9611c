//! Tests for preview scaling, visible regions and letterboxing

#[cfg(test)]
mod tests {
    use image::RgbaImage;
    use wallgen::canvas::paint::fill;
    use wallgen::canvas::viewport::{Region, Viewport};
    use wallgen::color::palette::Color;

    // Tests centered regions clamp to the outer bounds
    // Verified by centering without clamping
    #[test]
    fn test_region_centered() {
        assert_eq!(Region::centered(10, 4, 20, 10), Region::new(5, 3, 10, 4));
        assert_eq!(Region::centered(30, 30, 20, 10), Region::new(0, 0, 20, 10));
        assert_eq!(Region::new(0, 0, 3, 7).area(), 21);
    }

    // Tests the default viewport over the default master canvas
    // Verified by dividing by the height scale
    #[test]
    fn test_visible_region_of_square_master() {
        let viewport = Viewport::new(1920, 1080);
        assert!((viewport.scale_for(4000) - 0.48).abs() < 1e-12);
        let region = viewport.visible_region(4000, 4000);
        assert_eq!(region, Region::new(0, 875, 4000, 2250));
    }

    // Tests a tall viewport is limited by the canvas height
    // Verified by removing the min with the canvas size
    #[test]
    fn test_visible_region_clamps_to_canvas() {
        let viewport = Viewport::new(100, 400);
        let region = viewport.visible_region(200, 200);
        assert_eq!(region.width, 200);
        assert_eq!(region.height, 200);
    }

    // Tests synthetic mapping fills the viewport width
    // Verified by letterboxing synthetic canvases
    #[test]
    fn test_mapping_synthetic() {
        let viewport = Viewport::new(192, 108);
        let mapping = viewport.mapping(400, 400, false);
        assert_eq!(mapping.source, Region::new(0, 87, 400, 225));
        assert_eq!(mapping.destination.width, 192);
        assert_eq!(mapping.destination.height, 108);
    }

    // Tests image canvases are letterboxed and centered
    // Verified by using the max scale
    #[test]
    fn test_mapping_letterbox() {
        let viewport = Viewport::new(200, 100);
        let mapping = viewport.mapping(100, 100, true);
        assert!((mapping.scale - 1.0).abs() < 1e-12);
        assert_eq!(mapping.source, Region::new(0, 0, 100, 100));
        assert_eq!(mapping.destination, Region::new(50, 0, 100, 100));
    }

    // Tests presented frames have the viewport size and a background border
    // Verified by not filling the frame background
    #[test]
    fn test_present_letterboxed_frame() {
        let viewport = Viewport::new(60, 30);
        let mut canvas = RgbaImage::new(30, 30);
        fill(&mut canvas, Color::WHITE);

        let frame = viewport.present(&canvas, true, Color::BLACK);
        assert_eq!(frame.dimensions(), (60, 30));
        assert_eq!(frame.get_pixel(0, 15), &Color::BLACK.to_rgba());
        assert_eq!(frame.get_pixel(30, 15), &Color::WHITE.to_rgba());
    }

    // Tests presenting a synthetic canvas fills the whole viewport
    // Verified by skipping the crop of the visible region
    #[test]
    fn test_present_synthetic_frame() {
        let viewport = Viewport::new(48, 27);
        let mut canvas = RgbaImage::new(100, 100);
        fill(&mut canvas, Color::rgb(0, 128, 0));

        let frame = viewport.present(&canvas, false, Color::BLACK);
        assert_eq!(frame.dimensions(), (48, 27));
        assert!(frame.pixels().all(|p| *p == Color::rgb(0, 128, 0).to_rgba()));
    }
}
