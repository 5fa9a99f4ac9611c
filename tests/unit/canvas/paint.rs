//! Tests for alpha blending and shape rasterization

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use wallgen::canvas::paint::{
        blend, blend_pixel, fill, fill_circle, fill_polygon, fill_rect, overlay, stroke_line, wash,
    };
    use wallgen::color::palette::Color;

    fn lit_pixels(img: &RgbaImage, color: Color) -> usize {
        img.pixels().filter(|p| **p == color.to_rgba()).count()
    }

    // Tests source-over blending for opaque, transparent and translucent sources
    // Verified by ignoring destination alpha
    #[test]
    fn test_blend() {
        let dst = Rgba([0, 0, 0, 255]);
        assert_eq!(blend(dst, Color::TRANSPARENT), dst);
        assert_eq!(blend(dst, Color::WHITE), Rgba([255, 255, 255, 255]));

        let half = blend(dst, Color::WHITE.with_alpha(128));
        assert_eq!(half.0[3], 255);
        assert!((127..=129).contains(&half.0[0]));

        let onto_empty = blend(Rgba([0, 0, 0, 0]), Color::rgb(200, 10, 10).with_alpha(100));
        assert_eq!(onto_empty, Rgba([200, 10, 10, 100]));
    }

    // Tests out-of-bounds pixels are ignored
    // Verified by wrapping negative coordinates
    #[test]
    fn test_blend_pixel_clips() {
        let mut img = RgbaImage::new(4, 4);
        blend_pixel(&mut img, -1, 2, Color::WHITE);
        blend_pixel(&mut img, 4, 0, Color::WHITE);
        blend_pixel(&mut img, 3, 3, Color::WHITE);
        assert_eq!(lit_pixels(&img, Color::WHITE), 1);
    }

    // Tests fill replaces and wash blends
    // Verified by blending in fill
    #[test]
    fn test_fill_and_wash() {
        let mut img = RgbaImage::new(3, 3);
        fill(&mut img, Color::rgb(0, 0, 255).with_alpha(10));
        assert!(img.pixels().all(|p| *p == Rgba([0, 0, 255, 10])));

        fill(&mut img, Color::BLACK);
        wash(&mut img, Color::WHITE.with_alpha(255));
        assert_eq!(lit_pixels(&img, Color::WHITE), 9);
    }

    // Tests rectangles cover exactly their area and clip at the edges
    // Verified by using an inclusive end coordinate
    #[test]
    fn test_fill_rect() {
        let mut img = RgbaImage::new(10, 10);
        fill_rect(&mut img, 2.0, 3.0, 4.0, 2.0, Color::WHITE);
        assert_eq!(lit_pixels(&img, Color::WHITE), 8);
        assert_eq!(img.get_pixel(2, 3), &Color::WHITE.to_rgba());
        assert_eq!(img.get_pixel(6, 3), &Rgba([0, 0, 0, 0]));

        let mut clipped = RgbaImage::new(10, 10);
        fill_rect(&mut clipped, -5.0, -5.0, 8.0, 8.0, Color::WHITE);
        assert_eq!(lit_pixels(&clipped, Color::WHITE), 9);

        fill_rect(&mut clipped, 20.0, 20.0, 5.0, 5.0, Color::BLACK);
        fill_rect(&mut clipped, f64::NAN, 0.0, 5.0, 5.0, Color::BLACK);
        assert_eq!(lit_pixels(&clipped, Color::BLACK), 0);
    }

    // Tests discs cover roughly pi r squared pixels
    // Verified by sampling pixel corners instead of centers
    #[test]
    fn test_fill_circle_area() {
        let mut img = RgbaImage::new(100, 100);
        fill_circle(&mut img, 50.0, 50.0, 20.0, Color::WHITE);
        let area = lit_pixels(&img, Color::WHITE) as f64;
        let expected = std::f64::consts::PI * 400.0;
        assert!((area - expected).abs() / expected < 0.05, "area {area}");
    }

    // Tests a polygon square fills its interior and rejects degenerate input
    // Verified by skipping the closing edge
    #[test]
    fn test_fill_polygon() {
        let mut img = RgbaImage::new(20, 20);
        let square = [(4.0, 4.0), (14.0, 4.0), (14.0, 14.0), (4.0, 14.0)];
        fill_polygon(&mut img, &square, Color::WHITE);
        assert_eq!(lit_pixels(&img, Color::WHITE), 100);

        let mut untouched = RgbaImage::new(20, 20);
        fill_polygon(&mut untouched, &[(0.0, 0.0), (10.0, 10.0)], Color::WHITE);
        assert_eq!(lit_pixels(&untouched, Color::WHITE), 0);
    }

    // Tests translucent strokes blend each pixel once
    // Verified by drawing caps as separate discs
    #[test]
    fn test_stroke_line_blends_once() {
        let mut img = RgbaImage::new(40, 20);
        fill(&mut img, Color::BLACK);
        let ink = Color::WHITE.with_alpha(128);
        stroke_line(&mut img, (5.0, 10.0), (35.0, 10.0), 6.0, ink);

        let expected = blend(Color::BLACK.to_rgba(), ink);
        let touched: Vec<&Rgba<u8>> = img
            .pixels()
            .filter(|p| **p != Color::BLACK.to_rgba())
            .collect();
        assert!(!touched.is_empty());
        assert!(touched.iter().all(|p| **p == expected));
        assert_eq!(img.get_pixel(20, 10), &expected);
        assert_eq!(img.get_pixel(20, 2), &Color::BLACK.to_rgba());
    }

    // Tests overlays respect offset and opacity
    // Verified by ignoring the opacity argument
    #[test]
    fn test_overlay() {
        let mut dst = RgbaImage::new(6, 6);
        fill(&mut dst, Color::BLACK);
        let mut src = RgbaImage::new(2, 2);
        fill(&mut src, Color::WHITE);

        overlay(&mut dst, &src, 5, 5, 255);
        assert_eq!(lit_pixels(&dst, Color::WHITE), 1);

        overlay(&mut dst, &src, 0, 0, 0);
        assert_eq!(dst.get_pixel(0, 0), &Color::BLACK.to_rgba());
    }
}
