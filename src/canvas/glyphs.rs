//! Built-in 5x7 bitmap font
//!
//! Covers the ASCII mosaic ramp, digits, uppercase letters and the little
//! punctuation the metadata strip needs. Lowercase input is drawn uppercase;
//! anything else renders blank.

use crate::canvas::paint::fill_rect;
use crate::color::palette::Color;
use image::RgbaImage;

/// Glyph width in font pixels
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal gap between glyphs in font pixels
pub const GLYPH_SPACING: u32 = 1;

/// Rows of a glyph, top first, bit 4 is the leftmost column
pub type GlyphRows = [u8; 7];

const BLANK: GlyphRows = [0; 7];

/// Bitmap rows of a character, `None` if the font lacks it
pub const fn glyph(c: char) -> Option<GlyphRows> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => BLANK,
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x04, 0x04, 0x00, 0x04, 0x04, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '+' => [0x04, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x04],
        '*' => [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00],
        '#' => [0x00, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x00],
        '%' => [0x18, 0x19, 0x1A, 0x04, 0x0B, 0x13, 0x03],
        '@' => [0x0E, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0F],
        '|' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        _ => return None,
    };
    Some(rows)
}

/// Fraction of lit font pixels, used to check ramp ordering
pub fn ink_coverage(c: char) -> f64 {
    let lit: u32 = glyph(c)
        .unwrap_or(BLANK)
        .iter()
        .map(|row| row.count_ones())
        .sum();
    f64::from(lit) / f64::from(GLYPH_WIDTH * GLYPH_HEIGHT)
}

/// Draws one character with its top-left corner at `(x, y)`
///
/// `scale` is the size of one font pixel in canvas pixels.
pub fn draw_glyph(img: &mut RgbaImage, c: char, x: f64, y: f64, scale: f64, color: Color) {
    let Some(rows) = glyph(c) else {
        return;
    };
    for (row_index, row) in rows.iter().enumerate() {
        for column in 0..GLYPH_WIDTH {
            if row & (0x10 >> column) != 0 {
                fill_rect(
                    img,
                    x + f64::from(column) * scale,
                    y + row_index as f64 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}

/// Width in canvas pixels of `text` at `scale`
pub fn text_width(text: &str, scale: f64) -> f64 {
    let count = text.chars().count() as f64;
    if count == 0.0 {
        return 0.0;
    }
    (count * f64::from(GLYPH_WIDTH + GLYPH_SPACING) - f64::from(GLYPH_SPACING)) * scale
}

/// Draws a line of text, returning its width
pub fn draw_text(img: &mut RgbaImage, text: &str, x: f64, y: f64, scale: f64, color: Color) -> f64 {
    let advance = f64::from(GLYPH_WIDTH + GLYPH_SPACING) * scale;
    for (index, c) in text.chars().enumerate() {
        draw_glyph(img, c, x + index as f64 * advance, y, scale, color);
    }
    text_width(text, scale)
}
