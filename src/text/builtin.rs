//! Built-in bitmap face, the last link of the font fallback chain.
//!
//! Uses the Spleen bitmap family compiled into the binary, so it is always
//! available. Glyphs are nearest-neighbour scaled from the closest Spleen
//! cell to a `size/2 × size` cell, which keeps the 1:2 aspect of the
//! source fonts.

use image::RgbaImage;
use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};
use std::collections::HashMap;

use crate::palette::Color;
use crate::render::compose::blend_pixel;

/// Spleen source cell used for a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceCell {
    Small,
    Medium,
    Large,
}

impl SourceCell {
    fn for_size(px: u32) -> Self {
        if px < 16 {
            SourceCell::Small
        } else if px < 24 {
            SourceCell::Medium
        } else {
            SourceCell::Large
        }
    }

    fn dims(self) -> (usize, usize) {
        match self {
            SourceCell::Small => (6, 12),
            SourceCell::Medium => (8, 16),
            SourceCell::Large => (12, 24),
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            SourceCell::Small => FONT_6X12,
            SourceCell::Medium => FONT_8X16,
            SourceCell::Large => FONT_12X24,
        }
    }
}

/// Character cell (width, height) for a pixel size.
pub fn cell_size(px: u32) -> (u32, u32) {
    let h = px.max(1);
    let w = px.div_ceil(2).max(1);
    (w, h)
}

/// Advance-box measurement: every character occupies one cell.
pub fn measure(text: &str, px: u32) -> (u32, u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    let (w, h) = cell_size(px);
    (count * w, h)
}

/// Source bitmap for a character, row-major, `true` = ink.
/// `None` when the font has no glyph for it.
fn source_glyph(font: &mut PSF2Font, ch: char, cell: SourceCell) -> Option<Vec<bool>> {
    let (sw, sh) = cell.dims();
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;

    let mut bitmap = vec![false; sw * sh];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < sh && col_x < sw {
                bitmap[row_y * sw + col_x] = on;
            }
        }
    }
    Some(bitmap)
}

/// Box outline used for characters the font cannot render.
fn missing_glyph(sw: usize, sh: usize) -> Vec<bool> {
    let mut bitmap = vec![false; sw * sh];
    for x in 0..sw {
        bitmap[x] = true;
        bitmap[(sh - 1) * sw + x] = true;
    }
    for y in 0..sh {
        bitmap[y * sw] = true;
        bitmap[y * sw + sw - 1] = true;
    }
    bitmap
}

/// Draw `text` with its top-left corner at (`x`, `y`).
pub fn draw(canvas: &mut RgbaImage, x: i64, y: i64, text: &str, px: u32, color: Color) {
    let cell = SourceCell::for_size(px);
    let (sw, sh) = cell.dims();
    let (cw, ch) = cell_size(px);

    let mut font = PSF2Font::new(cell.font_data()).ok();
    let mut cache: HashMap<char, Vec<bool>> = HashMap::new();

    for (i, c) in text.chars().enumerate() {
        if c == ' ' {
            continue;
        }
        let bitmap = cache.entry(c).or_insert_with(|| {
            font.as_mut()
                .and_then(|f| source_glyph(f, c, cell))
                .unwrap_or_else(|| missing_glyph(sw, sh))
        });

        let origin_x = x + i as i64 * cw as i64;
        for dy in 0..ch as usize {
            let sy = dy * sh / ch as usize;
            for dx in 0..cw as usize {
                let sx = dx * sw / cw as usize;
                if bitmap[sy * sw + sx] {
                    blend_pixel(canvas, origin_x + dx as i64, y + dy as i64, color, 1.0);
                }
            }
        }
    }
}
