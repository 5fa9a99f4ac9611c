//! Palette selection and inversion resolved into concrete drawing colors

use crate::color::palette::{Color, ColorSet, REFERENCE_PARTICLE_COLORS};

/// Resolves a color set for the current inversion state
///
/// Inversion swaps background and foreground and reverses the accent order.
/// The input is never modified, so applying the inversion twice yields the
/// original set.
pub fn resolve(set: &ColorSet, inverted: bool) -> ColorSet {
    if !inverted {
        return set.clone();
    }

    let mut palette = set.foreground_palette.clone();
    palette.reverse();

    ColorSet {
        background: set.foreground,
        foreground: set.background,
        foreground_palette: palette,
    }
}

/// Whether a palette draws the particle flow with the reference colors
pub fn uses_reference_colors(palette_id: &str) -> bool {
    matches!(palette_id, "bw" | "wb")
}

/// Colors assigned to flow particles
///
/// The black/white palettes use the reference purple-to-amber set. Other
/// palettes use their accents, or five tints of the foreground when they
/// have none.
pub fn particle_colors(palette_id: &str, set: &ColorSet) -> Vec<Color> {
    if uses_reference_colors(palette_id) {
        return REFERENCE_PARTICLE_COLORS.to_vec();
    }
    if !set.foreground_palette.is_empty() {
        return set.foreground_palette.clone();
    }

    let fg = set.foreground;
    vec![
        fg,
        fg.scaled(0.9, 0.9, 1.1),
        fg.scaled(1.1, 0.8, 0.9),
        fg.scaled(0.85, 1.15, 0.9),
        fg.scaled(1.2, 1.1, 0.7),
    ]
}

/// Colors of hex automaton states, state 0 is the background
pub fn cell_colors(set: &ColorSet) -> Vec<Color> {
    let mut colors = vec![set.background];
    if set.foreground_palette.is_empty() {
        let fg = set.foreground;
        colors.extend([
            fg,
            fg.scaled(0.7, 1.2, 0.8),
            fg.scaled(1.2, 0.8, 0.7),
            fg.scaled(0.8, 0.9, 1.3),
            fg.scaled(1.1, 1.1, 0.7),
        ]);
    } else {
        colors.extend(set.foreground_palette.iter().copied());
    }
    colors
}
