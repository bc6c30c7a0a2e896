//! # Layout
//!
//! Recipes don't draw directly. They describe an image as a
//! [`Composition`]: a canvas size plus an ordered list of [`Layer`]s that
//! the generator renders on top of the blueprint background. Keeping the
//! plan separate from the pixels lets tests check positions and wrapping
//! without decoding images.
//!
//! Vertical centering of stacked text is shared by every recipe through
//! [`TextStack`]:
//!
//! ```text
//! start = top + floor((span - sum(reserved)) / 2)
//! ```
//!
//! after which each line advances the cursor by `size + advance`.

pub mod presets;

pub use presets::{CoverSize, HeaderSize, Platform, SizePreset};

use crate::assets::LogoVariant;
use crate::palette::Color;
use crate::render::compose::LogoPlacement;
use crate::text::{BrandFont, FontBook, wrap};

/// Width-based font step: below 800 px small, below 1200 px medium,
/// otherwise large.
pub fn scale_font_size(width: u32, small: u32, medium: u32, large: u32) -> u32 {
    if width < 800 {
        small
    } else if width < 1200 {
        medium
    } else {
        large
    }
}

/// Simulated stroke around a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Color,
    pub width: u32,
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    /// Left edge of the line box
    pub x: i64,
    /// Top edge of the line box
    pub y: i64,
    pub size: u32,
    pub bold: bool,
    pub fill: Color,
    pub outline: Option<Outline>,
}

/// A single drawing step.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Full-width translucent rectangle.
    Band { y: i64, height: u32, color: Color },
    /// Logo scaled into place at an anchor.
    Logo(LogoPlacement),
    /// Logo resized to a centred square with its alpha multiplied by `opacity`.
    Watermark {
        variant: LogoVariant,
        size: u32,
        opacity: f32,
    },
    Text(TextRun),
}

/// Everything needed to produce one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
}

impl Composition {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// All text runs, in drawing order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn logos(&self) -> impl Iterator<Item = &LogoPlacement> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Logo(placement) => Some(placement),
            _ => None,
        })
    }
}

/// Wrapped lines that share a font.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: BrandFont,
    pub bold: bool,
    /// Extra pixels added to the font size between lines
    pub advance: u32,
}

impl TextBlock {
    /// Word-wrap `text` to `max_width`.
    pub fn wrapped(
        fonts: &FontBook,
        text: &str,
        size: u32,
        bold: bool,
        max_width: u32,
        advance: u32,
    ) -> Self {
        let font = fonts.font(size, bold);
        let lines = wrap(text, &font, max_width);
        Self {
            lines,
            font,
            bold,
            advance,
        }
    }

    /// Use `text` verbatim as one line.
    pub fn single(fonts: &FontBook, text: &str, size: u32, bold: bool, advance: u32) -> Self {
        Self::from_lines(fonts, vec![text.to_string()], size, bold, advance)
    }

    pub fn from_lines(
        fonts: &FontBook,
        lines: Vec<String>,
        size: u32,
        bold: bool,
        advance: u32,
    ) -> Self {
        Self {
            lines,
            font: fonts.font(size, bold),
            bold,
            advance,
        }
    }

    pub fn size(&self) -> u32 {
        self.font.size()
    }

    /// Line pitch: font size plus the advance.
    pub fn pitch(&self) -> u32 {
        self.size() + self.advance
    }

    /// Total height at [`pitch`](Self::pitch) per line.
    pub fn height(&self) -> u32 {
        self.lines.len() as u32 * self.pitch()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Horizontal placement of a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Each line centred across the full canvas width.
    Centered { width: u32 },
    /// Lines left-aligned at `x`.
    Left { x: i64 },
}

impl Column {
    fn x_for(&self, line_width: u32) -> i64 {
        match *self {
            Column::Centered { width } => (width as i64 - line_width as i64).div_euclid(2),
            Column::Left { x } => x,
        }
    }
}

/// Running Y cursor that turns text blocks into positioned runs.
#[derive(Debug, Clone)]
pub struct TextStack {
    column: Column,
    cursor: i64,
    runs: Vec<TextRun>,
}

impl TextStack {
    /// Start at an explicit Y.
    pub fn at(column: Column, y: i64) -> Self {
        Self {
            column,
            cursor: y,
            runs: Vec::new(),
        }
    }

    /// Start so that `reserved` heights are centred within
    /// `top..top + span`.
    pub fn centered(column: Column, top: i64, span: i64, reserved: &[u32]) -> Self {
        let total: i64 = reserved.iter().map(|&r| r as i64).sum();
        Self::at(column, top + (span - total).div_euclid(2))
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Move the cursor down.
    pub fn gap(&mut self, px: u32) {
        self.cursor += px as i64;
    }

    /// Emit every line of `block`, advancing by its pitch.
    pub fn block(&mut self, block: &TextBlock, fill: Color, outline: Option<Outline>) {
        for line in &block.lines {
            let (w, _) = block.font.measure(line);
            self.runs.push(TextRun {
                text: line.clone(),
                x: self.column.x_for(w),
                y: self.cursor,
                size: block.size(),
                bold: block.bold,
                fill,
                outline,
            });
            self.cursor += block.pitch() as i64;
        }
    }

    pub fn into_runs(self) -> Vec<TextRun> {
        self.runs
    }

    /// Append the runs to `composition` as text layers.
    pub fn finish(self, composition: &mut Composition) {
        composition.layers.extend(self.runs.into_iter().map(Layer::Text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scale_font_size_steps() {
        assert_eq!(scale_font_size(799, 1, 2, 3), 1);
        assert_eq!(scale_font_size(800, 1, 2, 3), 2);
        assert_eq!(scale_font_size(1199, 1, 2, 3), 2);
        assert_eq!(scale_font_size(1200, 1, 2, 3), 3);
    }

    #[test]
    fn test_centered_start() {
        let column = Column::Left { x: 0 };
        assert_eq!(TextStack::centered(column, 0, 600, &[148]).cursor(), 226);
        assert_eq!(TextStack::centered(column, 180, 380, &[74, 48]).cursor(), 309);
        // Overfull stacks start above the top
        assert_eq!(TextStack::centered(column, 0, 100, &[301]).cursor(), -101);
    }

    #[test]
    fn test_block_positions() {
        let fonts = FontBook::builtin();
        let block = TextBlock::from_lines(&fonts, vec!["ab".into(), "abcd".into()], 20, true, 10);
        assert_eq!(block.height(), 60);

        let mut stack = TextStack::at(Column::Centered { width: 100 }, 50);
        stack.block(&block, Palette::BRAND.white, None);
        stack.gap(5);
        assert_eq!(stack.cursor(), 115);

        let runs = stack.into_runs();
        // Built-in cells are 10 px wide at 20 px
        assert_eq!((runs[0].x, runs[0].y), (40, 50));
        assert_eq!((runs[1].x, runs[1].y), (30, 80));
        assert!(runs.iter().all(|r| r.size == 20 && r.bold));
    }

    #[test]
    fn test_left_column() {
        let fonts = FontBook::builtin();
        let block = TextBlock::wrapped(&fonts, "one two three", 20, false, 80, 5);
        let mut stack = TextStack::at(Column::Left { x: 300 }, 0);
        stack.block(&block, Palette::BRAND.white, None);

        let runs = stack.into_runs();
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.x == 300));
        assert_eq!(runs[1].y, 25);
    }

    #[test]
    fn test_empty_block() {
        let fonts = FontBook::builtin();
        let block = TextBlock::wrapped(&fonts, "", 40, true, 500, 10);
        assert!(block.is_empty());
        assert_eq!(block.height(), 0);
    }

    #[test]
    fn test_composition_accessors() {
        let mut comp = Composition::new(0, 10);
        assert_eq!((comp.width, comp.height), (1, 10));
        comp.push(Layer::Band {
            y: 0,
            height: 2,
            color: Palette::BRAND.dark_blue,
        });
        assert_eq!(comp.text_runs().count(), 0);
        assert_eq!(comp.logos().count(), 0);
    }
}
