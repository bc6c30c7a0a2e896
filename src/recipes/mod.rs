//! # Recipes
//!
//! One planning function per product and style. Each `plan_*` method
//! resolves the canvas size from a preset, lays out logo and text, and
//! returns a [`Composition`]; [`BrandImageGenerator::render`] turns that
//! into pixels and `generate_*` saves the result.
//!
//! ## Products
//!
//! | Product | Request | Styles |
//! |---------|---------|--------|
//! | Email header | [`HeaderRequest`] | centered, left, minimal |
//! | Course cover | [`CoverRequest`] | corner-logo, split, overlay, banner |
//! | Social post | [`SocialPostRequest`] | quote, announcement, tip, stat |
//! | Profile picture | [`ProfileRequest`] | centred icon |
//!
//! ## Example
//!
//! ```
//! use brandkit::recipes::{BrandImageGenerator, HeaderRequest, HeaderLayout};
//!
//! let generator = BrandImageGenerator::builtin();
//! let request = HeaderRequest {
//!     title: "AI in Manufacturing".into(),
//!     layout: HeaderLayout::Minimal,
//!     ..Default::default()
//! };
//! let canvas = generator.header(&request);
//! assert_eq!(canvas.dimensions(), (1200, 600));
//! ```

mod cover;
mod header;
mod social;

pub use cover::{CoverLayout, CoverRequest, MAX_KEY_POINTS};
pub use header::{HeaderLayout, HeaderRequest};
pub use social::{ProfileRequest, SocialPostRequest, SocialStyle};

use std::path::Path;
use tracing::debug;

use crate::assets::LogoStore;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::layout::{Composition, Layer, Outline};
use crate::palette::Palette;
use crate::render::background::{Params, blueprint};
use crate::render::compose::{draw_outlined_text, draw_text, paint_band, place_logo_mut, watermark};
use crate::render::{Canvas, output};
use crate::text::FontBook;

/// Shared state for every recipe: palette, logos and fonts.
///
/// Built once and only read afterwards, so one generator can serve
/// many requests in parallel.
#[derive(Debug, Clone)]
pub struct BrandImageGenerator {
    pub palette: Palette,
    pub logos: LogoStore,
    pub fonts: FontBook,
    pub background: Params,
}

impl BrandImageGenerator {
    /// Load logos from the assets directory and resolve fonts.
    pub fn new(config: &GeneratorConfig) -> Self {
        let logos = LogoStore::load(&config.assets_dir);
        let fonts = FontBook::discover(config);
        debug!(
            logos = ?logos.loaded_keys(),
            regular = %fonts.describe(false),
            bold = %fonts.describe(true),
            "generator ready"
        );
        Self::from_parts(logos, fonts)
    }

    pub fn from_parts(logos: LogoStore, fonts: FontBook) -> Self {
        Self {
            palette: Palette::BRAND,
            logos,
            fonts,
            background: Params::default(),
        }
    }

    /// No logos, built-in font only. Output is identical on every host.
    pub fn builtin() -> Self {
        Self::from_parts(LogoStore::empty(), FontBook::builtin())
    }

    /// Default outline: palette black.
    pub(crate) fn outline(&self, width: u32) -> Option<Outline> {
        Some(Outline {
            color: self.palette.black,
            width,
        })
    }

    /// Draw a composition over a fresh background.
    pub fn render(&self, composition: &Composition) -> Canvas {
        let mut canvas = blueprint(
            composition.width,
            composition.height,
            &self.background,
            &self.palette,
        );

        for layer in &composition.layers {
            match layer {
                Layer::Band { y, height, color } => paint_band(&mut canvas, *y, *height, *color),
                Layer::Logo(placement) => {
                    place_logo_mut(&mut canvas, &self.logos, placement);
                }
                Layer::Watermark { variant, size, opacity } => match self.logos.get(*variant) {
                    Some(logo) => watermark(&mut canvas, logo, *size, *opacity),
                    None => debug!(variant = variant.key(), "no logo for watermark"),
                },
                Layer::Text(run) => {
                    let font = self.fonts.font(run.size, run.bold);
                    match run.outline {
                        Some(outline) => draw_outlined_text(
                            &mut canvas,
                            (run.x, run.y),
                            &run.text,
                            &font,
                            run.fill,
                            outline.color,
                            outline.width,
                        ),
                        None => draw_text(&mut canvas, (run.x, run.y), &run.text, &font, run.fill),
                    }
                }
            }
        }

        canvas
    }

    /// Render and write to `path`; the format follows the extension.
    pub(crate) fn save(&self, composition: &Composition, path: &Path) -> Result<Canvas> {
        let canvas = self.render(composition);
        output::save(&canvas, path)?;
        Ok(canvas)
    }

    /// Bare blueprint background.
    pub fn background(&self, width: u32, height: u32, params: &Params) -> Canvas {
        blueprint(width, height, params, &self.palette)
    }
}
