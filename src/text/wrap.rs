//! Greedy word wrapping by measured pixel width.

use super::font::BrandFont;

/// Anything that can report the pixel size of a run of text.
pub trait TextMeasure {
    /// (width, height) in pixels.
    fn measure(&self, text: &str) -> (u32, u32);
}

impl TextMeasure for BrandFont {
    fn measure(&self, text: &str) -> (u32, u32) {
        BrandFont::measure(self, text)
    }
}

/// Split `text` on whitespace and pack words into lines no wider than
/// `max_width`.
///
/// A word that is wider than `max_width` on its own still gets a line to
/// itself; words are never split.
pub fn wrap(text: &str, font: &impl TextMeasure, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if font.measure(&candidate).0 <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
