//! Tests for inversion and per-algorithm color derivation

#[cfg(test)]
mod tests {
    use wallgen::color::palette::{Color, ColorSet, PaletteRegistry, REFERENCE_PARTICLE_COLORS};
    use wallgen::color::resolver::{cell_colors, particle_colors, resolve, uses_reference_colors};

    fn accented() -> ColorSet {
        ColorSet::new(
            Color::rgb(10, 10, 10),
            Color::rgb(240, 240, 240),
            vec![Color::rgb(1, 0, 0), Color::rgb(0, 2, 0), Color::rgb(0, 0, 3)],
        )
    }

    // Tests inversion swaps background and foreground and reverses accents
    // Verified by leaving the accent order unchanged
    #[test]
    fn test_inversion_swaps_and_reverses() {
        let set = accented();
        let inverted = resolve(&set, true);

        assert_eq!(inverted.background, set.foreground);
        assert_eq!(inverted.foreground, set.background);
        assert_eq!(
            inverted.foreground_palette,
            vec![Color::rgb(0, 0, 3), Color::rgb(0, 2, 0), Color::rgb(1, 0, 0)]
        );
        assert_eq!(resolve(&set, false), set);
    }

    // Tests inverting twice restores every built-in palette
    // Verified by swapping only the background on inversion
    #[test]
    fn test_inversion_is_an_involution() {
        let registry = PaletteRegistry::builtin();
        for id in registry.ids() {
            let set = &registry.get(id).colors;
            assert_eq!(&resolve(&resolve(set, true), true), set, "palette {id}");
        }
    }

    // Tests the black and white palettes use the reference particle colors
    // Verified by returning accents first
    #[test]
    fn test_particle_colors_for_black_and_white() {
        assert!(uses_reference_colors("bw"));
        assert!(uses_reference_colors("wb"));
        assert!(!uses_reference_colors("sunset"));

        let set = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        assert_eq!(particle_colors("bw", &set), REFERENCE_PARTICLE_COLORS.to_vec());
    }

    // Tests other palettes use accents or five foreground tints
    // Verified by returning the foreground alone
    #[test]
    fn test_particle_colors_for_other_palettes() {
        let set = accented();
        assert_eq!(particle_colors("custom", &set), set.foreground_palette);

        let plain = ColorSet::new(Color::BLACK, Color::rgb(100, 100, 100), Vec::new());
        let tints = particle_colors("gray", &plain);
        assert_eq!(tints.len(), 5);
        assert_eq!(tints.first(), Some(&Color::rgb(100, 100, 100)));
    }

    // Tests hex state colors start with the background
    // Verified by appending the background last
    #[test]
    fn test_cell_colors() {
        let set = accented();
        let colors = cell_colors(&set);
        assert_eq!(colors.first(), Some(&set.background));
        assert_eq!(colors.len(), 1 + set.foreground_palette.len());

        let plain = ColorSet::new(Color::BLACK, Color::WHITE, Vec::new());
        let derived = cell_colors(&plain);
        assert_eq!(derived.len(), 6);
        assert_eq!(derived.get(1), Some(&Color::WHITE));
    }
}
