//! Tests for the gradient bands shader

#[cfg(test)]
mod tests {
    use wallgen::algorithm::gradient::{GradientBands, endpoints, shade, time_step};
    use wallgen::algorithm::kind::{Generator, TickContext, TickOutcome};
    use wallgen::canvas::master::MasterCanvas;
    use wallgen::color::palette::{Color, ColorSet};
    use wallgen::params::normalize::normalize;
    use wallgen::params::parameters::ParameterSet;

    fn context<'a>(colors: &'a ColorSet, params: &'a ParameterSet, capturing: bool) -> TickContext<'a> {
        TickContext {
            colors,
            palette_id: "bw",
            params,
            normalized: normalize(params),
            capturing,
            source: None,
        }
    }

    fn brightness(canvas: &MasterCanvas, x: u32, y: u32) -> f64 {
        canvas.pixel(x, y).map_or(0.0, Color::luma)
    }

    // Tests endpoints prefer accents and fall back to foreground and background
    // Verified by swapping the fallback order
    #[test]
    fn test_endpoints() {
        let plain = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        assert_eq!(endpoints(&plain), (Color::WHITE, Color::BLACK));

        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let one = ColorSet::new(Color::BLACK, Color::WHITE, vec![red]);
        assert_eq!(endpoints(&one), (red, Color::BLACK));

        let two = ColorSet::new(Color::BLACK, Color::WHITE, vec![red, blue]);
        assert_eq!(endpoints(&two), (red, blue));
    }

    // Tests time advances with speed and doubles while capturing
    // Verified by ignoring the capture flag
    #[test]
    fn test_time_step() {
        assert!((time_step(50.0, false) - 1.0 / 30.0).abs() < 1e-12);
        assert!((time_step(50.0, true) - 2.0 / 30.0).abs() < 1e-12);
        assert!(time_step(0.0, false).abs() < f64::EPSILON);
    }

    // Tests the ramp darkens the bottom edge and the arch lights the middle
    // Verified by dropping the glow term
    #[test]
    fn test_shade() {
        let white = [1.0, 1.0, 1.0];
        let black = [0.0, 0.0, 0.0];

        assert_eq!(shade(white, black, 0.5, 0.0, 0.0), [0.0, 0.0, 0.0]);

        let middle = shade(white, black, 0.5, 0.5, 0.0);
        for channel in middle {
            assert!((channel - 0.75).abs() < 1e-4, "channel {channel}");
        }
    }

    // Tests the frame is opaque and brightest inside the arch
    // Verified by sampling pixel corners instead of centers
    #[test]
    fn test_frame_layout() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet::default();
        let mut canvas = MasterCanvas::new(100, 100);
        let bands = GradientBands::new(&mut canvas, &context(&colors, &params, false), 0);

        assert!(bands.time().abs() < f64::EPSILON);
        assert!(canvas.image().pixels().all(|p| p.0[3] == 255));

        let center = brightness(&canvas, 50, 50);
        assert!(center > brightness(&canvas, 50, 99) + 100.0);
        assert!(center > brightness(&canvas, 50, 0) + 100.0);
    }

    // Tests each tick advances time by the step and redraws
    // Verified by advancing time only on refresh
    #[test]
    fn test_tick_advances_time() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet {
            speed: 50.0,
            ..ParameterSet::default()
        };
        let mut canvas = MasterCanvas::new(40, 40);
        let mut bands = GradientBands::new(&mut canvas, &context(&colors, &params, false), 0);

        let ctx = context(&colors, &params, false);
        for _ in 0..3 {
            assert_eq!(bands.tick(&mut canvas, &ctx), TickOutcome::Drawn);
        }
        assert!((bands.time() - 3.0 / 30.0).abs() < 1e-9);

        let capture = context(&colors, &params, true);
        bands.tick(&mut canvas, &capture);
        assert!((bands.time() - 5.0 / 30.0).abs() < 1e-9);
    }
}
