//! Colors, color sets and the built-in palette registry

use crate::io::error::{WallgenError, invalid_parameter};
use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Most foreground entries a palette may carry
pub const MAX_PALETTE_COLORS: usize = 5;

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, 255 is opaque
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pixel value for an `image` buffer
    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Color read back from an `image` pixel
    pub const fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }

    /// Multiplies each color channel, saturating at the channel bounds
    pub fn scaled(self, r: f64, g: f64, b: f64) -> Self {
        Self {
            r: scale_channel(self.r, r),
            g: scale_channel(self.g, g),
            b: scale_channel(self.b, b),
            a: self.a,
        }
    }

    /// Perceptual brightness in `[0, 255]`
    pub fn luma(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Linear blend towards `other`, `t` in `[0, 1]`
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Channels as floats in `[0, 1]`
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

fn scale_channel(value: u8, factor: f64) -> u8 {
    (f64::from(value) * factor).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = WallgenError;

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`, the leading `#` is optional
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = |reason: &str| invalid_parameter("color", &s, &reason);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("expected hexadecimal digits"));
        }

        let byte = |start: usize| {
            hex.get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid("truncated channel"))
        };

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                    let nibble = digit.to_digit(16).unwrap_or(0) as u8;
                    *slot = nibble * 17;
                }
                let [r, g, b] = channels;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid("expected 3, 6 or 8 hex digits")),
        }
    }
}

/// Concrete colors an algorithm draws with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSet {
    /// Canvas background
    pub background: Color,
    /// Primary drawing color
    pub foreground: Color,
    /// Ordered accent colors, may be empty
    pub foreground_palette: Vec<Color>,
}

impl ColorSet {
    /// Builds a color set, keeping at most [`MAX_PALETTE_COLORS`] accents
    pub fn new(background: Color, foreground: Color, mut foreground_palette: Vec<Color>) -> Self {
        foreground_palette.truncate(MAX_PALETTE_COLORS);
        Self {
            background,
            foreground,
            foreground_palette,
        }
    }

    /// Colors available for drawing
    ///
    /// The accent palette when present, otherwise the foreground alone.
    pub fn drawing_colors(&self) -> Vec<Color> {
        if self.foreground_palette.is_empty() {
            vec![self.foreground]
        } else {
            self.foreground_palette.clone()
        }
    }
}

/// A named color scheme selectable by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Stable identifier used for selection
    pub id: String,
    /// Human readable name
    pub label: String,
    /// Colors of the scheme
    pub colors: ColorSet,
}

impl Palette {
    /// Creates a palette
    pub fn new(id: &str, label: &str, colors: ColorSet) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            colors,
        }
    }
}

/// Ordered collection of palettes with fallback lookup
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: Vec<Palette>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    /// Registry holding the built-in palettes, `bw` first
    pub fn builtin() -> Self {
        let two_tone = |id: &str, label: &str, bg: Color, fg: Color| {
            Palette::new(id, label, ColorSet::new(bg, fg, Vec::new()))
        };

        let palettes = vec![
            two_tone("bw", "Black & White", Color::BLACK, Color::WHITE),
            two_tone("wb", "White & Black", Color::WHITE, Color::BLACK),
            two_tone(
                "gray",
                "Graphite",
                Color::rgb(0x22, 0x22, 0x22),
                Color::rgb(0xDD, 0xDD, 0xDD),
            ),
            two_tone(
                "blue",
                "Midnight",
                Color::rgb(0x0F, 0x17, 0x2A),
                Color::rgb(0xE2, 0xE8, 0xF0),
            ),
            two_tone(
                "purple",
                "Violet",
                Color::rgb(0x2E, 0x10, 0x65),
                Color::rgb(0xDD, 0xD6, 0xFE),
            ),
            two_tone(
                "red",
                "Crimson",
                Color::rgb(0x4C, 0x05, 0x19),
                Color::rgb(0xFE, 0xD7, 0xE2),
            ),
            Palette::new(
                "sunset",
                "Sunset",
                ColorSet::new(
                    REFERENCE_BACKGROUND,
                    Color::rgb(0xFF, 0xC3, 0x0F),
                    REFERENCE_PARTICLE_COLORS.to_vec(),
                ),
            ),
            Palette::new(
                "mondrian",
                "De Stijl",
                ColorSet::new(
                    Color::rgb(0xF4, 0xF1, 0xEA),
                    Color::rgb(0x11, 0x11, 0x11),
                    vec![
                        Color::rgb(220, 50, 50),
                        Color::rgb(50, 50, 220),
                        Color::rgb(220, 220, 50),
                    ],
                ),
            ),
        ];

        Self { palettes }
    }

    /// Looks a palette up by identifier, falling back to the first palette
    pub fn get(&self, id: &str) -> &Palette {
        self.palettes
            .iter()
            .find(|palette| palette.id == id)
            .or_else(|| self.palettes.first())
            .unwrap_or(&FALLBACK_PALETTE)
    }

    /// Whether a palette with this identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.palettes.iter().any(|palette| palette.id == id)
    }

    /// Adds a user palette, replacing any palette with the same identifier
    pub fn add_custom(&mut self, palette: Palette) {
        if let Some(existing) = self.palettes.iter_mut().find(|p| p.id == palette.id) {
            *existing = palette;
        } else {
            self.palettes.push(palette);
        }
    }

    /// Registered identifiers in selection order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|palette| palette.id.as_str())
    }

    /// Number of registered palettes
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Deep purple behind the reference particle colors
pub const REFERENCE_BACKGROUND: Color = Color::rgb(0x1A, 0x06, 0x33);

/// Purple-to-amber particle colors used with the black/white palettes
pub const REFERENCE_PARTICLE_COLORS: [Color; 5] = [
    Color::rgb(0x58, 0x18, 0x45),
    Color::rgb(0x90, 0x0C, 0x3F),
    Color::rgb(0xC7, 0x00, 0x39),
    Color::rgb(0xFF, 0x57, 0x33),
    Color::rgb(0xFF, 0xC3, 0x0F),
];

static FALLBACK_PALETTE: Palette = Palette {
    id: String::new(),
    label: String::new(),
    colors: ColorSet {
        background: Color::BLACK,
        foreground: Color::WHITE,
        foreground_palette: Vec::new(),
    },
};
