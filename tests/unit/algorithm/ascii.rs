//! Tests for the ASCII mosaic

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use wallgen::algorithm::ascii::{AsciiMosaic, cell_size, ramp_char};
    use wallgen::algorithm::kind::{Generator, TickContext, TickOutcome};
    use wallgen::canvas::master::MasterCanvas;
    use wallgen::color::palette::{Color, ColorSet};
    use wallgen::io::configuration::ASCII_RAMP;
    use wallgen::params::normalize::normalize;
    use wallgen::params::parameters::ParameterSet;

    fn context<'a>(
        colors: &'a ColorSet,
        params: &'a ParameterSet,
        source: Option<&'a RgbaImage>,
    ) -> TickContext<'a> {
        TickContext {
            colors,
            palette_id: "bw",
            params,
            normalized: normalize(params),
            capturing: false,
            source,
        }
    }

    // Tests cell size scales with canvas width and floors at six pixels
    // Verified by dropping the minimum
    #[test]
    fn test_cell_size() {
        assert_eq!(cell_size(4000, 8), 29);
        assert_eq!(cell_size(4000, 1), 76);
        assert_eq!(cell_size(100, 11), 6);
        assert_eq!(cell_size(0, 1), 6);
    }

    // Tests the ramp runs from blank to densest
    // Verified by reversing the ramp lookup
    #[test]
    fn test_ramp_char() {
        assert_eq!(ramp_char(0.0), ' ');
        assert_eq!(ramp_char(255.0), '@');
        assert_eq!(ramp_char(255.0 * 4.0 / 9.0), '=');
        assert_eq!(ramp_char(-20.0), ' ');
        assert_eq!(ramp_char(400.0), '@');
    }

    // Tests the grid covers the canvas in whole cells
    // Verified by rounding the column count up
    #[test]
    fn test_lines_cover_canvas() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet::default();
        let mut canvas = MasterCanvas::new(200, 100);
        let mosaic = AsciiMosaic::new(&mut canvas, &context(&colors, &params, None), 3);

        assert_eq!(mosaic.cell(), 6);
        let lines = mosaic.lines();
        assert_eq!(lines.len(), 16);
        for line in &lines {
            assert_eq!(line.chars().count(), 33);
            assert!(line.chars().all(|c| ASCII_RAMP.contains(c)));
        }
    }

    // Tests a white source fills the ramp end and a black one leaves the background
    // Verified by inverting the brightness lookup
    #[test]
    fn test_source_brightness() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet::default();

        let white = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let mut canvas = MasterCanvas::new(120, 120);
        let mosaic = AsciiMosaic::new(&mut canvas, &context(&colors, &params, Some(&white)), 0);
        assert!(mosaic.lines().iter().all(|line| line.chars().all(|c| c == '@')));
        assert!(canvas.image().pixels().any(|p| Color::from_rgba(*p) == Color::WHITE));

        let black = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let mut canvas = MasterCanvas::new(120, 120);
        let mut mosaic = AsciiMosaic::new(&mut canvas, &context(&colors, &params, Some(&black)), 0);
        assert!(mosaic.lines().iter().all(|line| line.chars().all(|c| c == ' ')));
        assert!(canvas.image().pixels().all(|p| Color::from_rgba(*p) == Color::BLACK));

        let ctx = context(&colors, &params, Some(&black));
        assert_eq!(mosaic.tick(&mut canvas, &ctx), TickOutcome::Idle);
    }
}
