//! Tests for the particle field and the particle flow generator

#[cfg(test)]
mod tests {
    use wallgen::algorithm::kind::{Generator, TickContext, TickOutcome};
    use wallgen::algorithm::perlin_flow::{ParticleField, PerlinFlow, heading};
    use wallgen::canvas::master::MasterCanvas;
    use wallgen::color::palette::{Color, ColorSet, REFERENCE_BACKGROUND};
    use wallgen::io::configuration::PARTICLE_COUNT;
    use wallgen::math::noise::PerlinNoise;
    use wallgen::params::normalize::normalize;
    use wallgen::params::parameters::ParameterSet;

    fn context<'a>(
        colors: &'a ColorSet,
        palette_id: &'a str,
        params: &'a ParameterSet,
        capturing: bool,
    ) -> TickContext<'a> {
        TickContext {
            colors,
            palette_id,
            params,
            normalized: normalize(params),
            capturing,
            source: None,
        }
    }

    // Tests particles stay on the canvas across many steps
    // Verified by removing the respawn of escaped particles
    #[test]
    fn test_particles_stay_in_bounds() {
        let mut field = ParticleField::new(120.0, 80.0, 200, &[Color::WHITE], 4);
        for _ in 0..200 {
            field.step();
        }
        assert_eq!(field.particles().len(), 200);
        assert!(field.particles().iter().all(|p| {
            (0.0..=120.0).contains(&p.x) && (0.0..=80.0).contains(&p.y)
        }));
    }

    // Tests the index holds every particle after a rebuild
    // Verified by skipping the clear before reinsertion
    #[test]
    fn test_index_matches_particles() {
        let mut field = ParticleField::new(300.0, 300.0, 150, &[Color::WHITE], 8);
        field.step();
        field.rebuild_index();
        field.rebuild_index();
        assert_eq!(field.index().len(), 150);

        let everything = field.neighbors(150.0, 150.0, 200.0);
        assert_eq!(everything.len(), 150);

        let particle = field.particles().first().copied().unwrap();
        let near = field.neighbors(particle.x, particle.y, 1.0);
        assert!(near.contains(&0));
    }

    // Tests colors are assigned round-robin
    // Verified by assigning the first color to everyone
    #[test]
    fn test_colors_cycle() {
        let colors = [Color::rgb(1, 0, 0), Color::rgb(0, 1, 0), Color::rgb(0, 0, 1)];
        let field = ParticleField::new(50.0, 50.0, 7, &colors, 1);
        let assigned: Vec<Color> = field.particles().iter().map(|p| p.color).collect();
        assert_eq!(assigned.get(3), colors.first());
        assert_eq!(assigned.get(5), colors.get(2));
    }

    // Tests the heading is deterministic for a noise field
    // Verified by adding the random offset on every call
    #[test]
    fn test_heading_is_deterministic() {
        let noise = PerlinNoise::new(2);
        let a = heading(&noise, 10.0, 20.0, (0.0, 0.0));
        let b = heading(&noise, 10.0, 20.0, (0.0, 0.0));
        assert!((a - b).abs() < f64::EPSILON);
        let shifted = heading(&noise, 10.0, 20.0, (3.3, 0.0));
        assert!((a - shifted).abs() > f64::EPSILON);
    }

    // Tests the black and white palette paints the reference background first
    // Verified by painting the palette background instead
    #[test]
    fn test_initial_background() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet::default();
        let mut canvas = MasterCanvas::square(64);

        let mut flow = PerlinFlow::new(&mut canvas, &context(&colors, "bw", &params, false), 3);
        assert_eq!(canvas.pixel(0, 0), Some(REFERENCE_BACKGROUND));
        assert_eq!(flow.field().particles().len(), PARTICLE_COUNT);

        let outcome = flow.tick(&mut canvas, &context(&colors, "bw", &params, false));
        assert_eq!(outcome, TickOutcome::Drawn);

        let mut other = MasterCanvas::square(64);
        PerlinFlow::new(&mut other, &context(&colors, "gray", &params, false), 3);
        assert_eq!(other.pixel(0, 0), Some(Color::BLACK));
    }

    // Tests a capture tick moves particles as far as two preview ticks
    // Verified by using a single substep while capturing
    #[test]
    fn test_capture_substeps() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet::default();
        let mut captured_canvas = MasterCanvas::square(32);
        let mut preview_canvas = MasterCanvas::square(32);
        let capture = context(&colors, "bw", &params, true);
        let preview = context(&colors, "bw", &params, false);
        let mut captured = PerlinFlow::new(&mut captured_canvas, &capture, 3);
        let mut previewed = PerlinFlow::new(&mut preview_canvas, &preview, 3);

        captured.tick(&mut captured_canvas, &capture);
        previewed.tick(&mut preview_canvas, &preview);
        assert_ne!(captured.field().particles(), previewed.field().particles());

        previewed.tick(&mut preview_canvas, &preview);
        assert_eq!(captured.field().particles(), previewed.field().particles());
    }

    // Tests transparent mode starts transparent and only lightly fades the background
    // Verified by painting an opaque background in transparent mode
    #[test]
    fn test_transparent_background() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet {
            transparent_background: true,
            ..ParameterSet::default()
        };
        let mut canvas = MasterCanvas::square(200);
        let mut flow = PerlinFlow::new(&mut canvas, &context(&colors, "gray", &params, false), 5);
        assert_eq!(canvas.pixel(10, 10), Some(Color::TRANSPARENT));

        for _ in 0..3 {
            flow.tick(&mut canvas, &context(&colors, "gray", &params, false));
        }
        let opaque = canvas.image().pixels().filter(|p| p.0[3] == 255).count();
        let faded = canvas.image().pixels().filter(|p| p.0[3] < 16).count();
        assert!(opaque > 0);
        assert!(faded > 0);
        assert_eq!(opaque + faded, 200 * 200);
    }

    // Tests the black and white palettes keep the reference background in transparent mode
    // Verified by clearing to transparent before checking the palette
    #[test]
    fn test_reference_background_ignores_transparency() {
        let colors = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let params = ParameterSet {
            transparent_background: true,
            ..ParameterSet::default()
        };
        for palette in ["bw", "wb"] {
            let mut canvas = MasterCanvas::square(48);
            PerlinFlow::new(&mut canvas, &context(&colors, palette, &params, false), 5);
            assert_eq!(canvas.pixel(0, 0), Some(REFERENCE_BACKGROUND));
        }
    }
}
