//! Course covers.
//!
//! Titles are upper-cased, subtitles lower-cased, key points are kept as
//! written. At most [`MAX_KEY_POINTS`] bullets are laid out.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::BrandImageGenerator;
use crate::assets::LogoVariant;
use crate::error::Result;
use crate::layout::{Column, Composition, CoverSize, Layer, TextBlock, TextStack};
use crate::palette::with_alpha;
use crate::render::Canvas;
use crate::render::compose::{Anchor, LogoPlacement};

/// Bullets beyond this are dropped.
pub const MAX_KEY_POINTS: usize = 4;

const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CoverLayout {
    /// Icon in the bottom-left corner, everything else centred
    #[default]
    CornerLogo,
    /// Icon in the left third, text column on the right
    Split,
    /// Faint centred watermark behind large centred text
    Overlay,
    /// Translucent band across the middle holding icon and text
    Banner,
}

impl CoverLayout {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "corner-logo" => CoverLayout::CornerLogo,
            "split" => CoverLayout::Split,
            "overlay" => CoverLayout::Overlay,
            "banner" => CoverLayout::Banner,
            other => {
                debug!(layout = other, "unknown cover layout, using corner-logo");
                CoverLayout::CornerLogo
            }
        }
    }
}

impl From<String> for CoverLayout {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Parameters for one course cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoverRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub key_points: Vec<String>,
    pub layout: CoverLayout,
    pub size: CoverSize,
}

impl CoverRequest {
    fn subtitle(&self) -> Option<String> {
        self.subtitle.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_lowercase)
    }

    /// Bulleted key points, truncated.
    fn bullets(&self) -> Vec<String> {
        if self.key_points.len() > MAX_KEY_POINTS {
            debug!(given = self.key_points.len(), "dropping extra key points");
        }
        self.key_points
            .iter()
            .take(MAX_KEY_POINTS)
            .map(|point| format!("{}{}", BULLET, point))
            .collect()
    }
}

impl BrandImageGenerator {
    /// Lay out a course cover.
    pub fn plan_cover(&self, request: &CoverRequest) -> Composition {
        let (width, height) = request.size.preset().dimensions();
        let mut comp = Composition::new(width, height);

        match request.layout {
            CoverLayout::CornerLogo => self.cover_corner_logo(&mut comp, request),
            CoverLayout::Split => self.cover_split(&mut comp, request),
            CoverLayout::Overlay => self.cover_overlay(&mut comp, request),
            CoverLayout::Banner => self.cover_banner(&mut comp, request),
        }

        comp
    }

    pub fn cover(&self, request: &CoverRequest) -> Canvas {
        self.render(&self.plan_cover(request))
    }

    /// Render a course cover and save it to `path`.
    pub fn generate_cover(
        &self,
        request: &CoverRequest,
        path: impl AsRef<Path>,
    ) -> Result<Canvas> {
        self.save(&self.plan_cover(request), path.as_ref())
    }

    fn cover_corner_logo(&self, comp: &mut Composition, request: &CoverRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1500;
        comp.push(Layer::Logo(LogoPlacement::icon(Anchor::BottomLeft).max(180).margin(40)));

        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_uppercase(),
            if wide { 72 } else { 56 },
            true,
            (width as f64 * 0.75) as u32,
            15,
        );
        let subtitle_size = if wide { 36 } else { 28 };
        let subtitle = request
            .subtitle()
            .map(|text| TextBlock::single(&self.fonts, &text, subtitle_size, false, 25));
        let bullets = request.bullets();
        let point_size = if wide { 28 } else { 22 };
        let points = (!bullets.is_empty())
            .then(|| TextBlock::from_lines(&self.fonts, bullets, point_size, false, 12));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.pitch());
        }
        if let Some(points) = &points {
            reserved.push(points.height() + 30);
        }

        let column = Column::Centered { width };
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(4));
        if let Some(sub) = &subtitle {
            stack.gap(20);
            stack.block(sub, self.palette.white, None);
        }
        if let Some(points) = &points {
            stack.gap(30);
            stack.block(points, self.palette.white, None);
        }
        stack.finish(comp);
    }

    fn cover_split(&self, comp: &mut Composition, request: &CoverRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1500;
        let logo_column = width / 3;
        let logo_width = (logo_column as f64 * 0.8) as u32;
        let logo_height = (height as f64 * 0.6) as u32;
        comp.push(Layer::Logo(
            LogoPlacement::icon(Anchor::CenterLeft)
                .max_size(logo_width, logo_height)
                .margin(40),
        ));

        let x = logo_column + 40;
        let column_width = width.saturating_sub(x + 60);
        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_uppercase(),
            if wide { 64 } else { 48 },
            true,
            column_width,
            12,
        );
        let subtitle_size = if wide { 32 } else { 24 };
        let subtitle = request.subtitle().map(|text| {
            TextBlock::wrapped(&self.fonts, &text, subtitle_size, false, column_width, 5)
        });
        let bullets = request.bullets();
        let point_size = if wide { 26 } else { 20 };
        let points = (!bullets.is_empty())
            .then(|| TextBlock::from_lines(&self.fonts, bullets, point_size, false, 10));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 25);
        }
        if let Some(points) = &points {
            reserved.push(points.height() + 30);
        }

        let column = Column::Left { x: x as i64 };
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(3));
        if let Some(sub) = &subtitle {
            stack.gap(15);
            stack.block(sub, self.palette.white, None);
        }
        if let Some(points) = &points {
            stack.gap(25);
            stack.block(points, self.palette.white, None);
        }
        stack.finish(comp);
    }

    fn cover_overlay(&self, comp: &mut Composition, request: &CoverRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1500;
        comp.push(Layer::Watermark {
            variant: LogoVariant::IconNoBg,
            size: (width.min(height) as f64 * 0.6) as u32,
            opacity: 0.15,
        });

        let max_width = (width as f64 * 0.8) as u32;
        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_uppercase(),
            if wide { 80 } else { 60 },
            true,
            max_width,
            15,
        );
        let subtitle_size = if wide { 40 } else { 30 };
        let subtitle = request
            .subtitle()
            .map(|text| TextBlock::wrapped(&self.fonts, &text, subtitle_size, false, max_width, 5));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 30);
        }

        let column = Column::Centered { width };
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(5));
        if let Some(sub) = &subtitle {
            stack.gap(25);
            stack.block(sub, self.palette.white, self.outline(3));
        }
        stack.finish(comp);
    }

    fn cover_banner(&self, comp: &mut Composition, request: &CoverRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1500;

        let band_height = (height as f64 * 0.4) as u32;
        let band_y = (height - band_height) as i64 / 2;
        comp.push(Layer::Band {
            y: band_y,
            height: band_height,
            color: with_alpha(self.palette.dark_blue, 220),
        });

        let logo_size = (band_height as f64 * 0.7) as u32;
        comp.push(Layer::Logo(LogoPlacement::icon(Anchor::CenterLeft).max(logo_size).margin(50)));

        let x = logo_size + 120;
        let column_width = width.saturating_sub(x + 60);
        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_uppercase(),
            if wide { 58 } else { 44 },
            true,
            column_width,
            10,
        );
        let subtitle_size = if wide { 30 } else { 24 };
        let subtitle = request
            .subtitle()
            .map(|text| TextBlock::single(&self.fonts, &text, subtitle_size, false, 0));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 15);
        }

        let column = Column::Left { x: x as i64 };
        let mut stack = TextStack::centered(column, band_y, band_height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, None);
        if let Some(sub) = &subtitle {
            stack.gap(10);
            stack.block(sub, self.palette.white, None);
        }
        stack.finish(comp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(layout: CoverLayout) -> CoverRequest {
        CoverRequest {
            title: "AI Operations Fundamentals".into(),
            subtitle: Some("From Setup to Scale".into()),
            key_points: vec![
                "Practical Implementation".into(),
                "Real-World Case Studies".into(),
                "Measurable ROI".into(),
                "Hands-On Projects".into(),
            ],
            layout,
            size: CoverSize::Hd,
        }
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(CoverLayout::from_name("corner-logo"), CoverLayout::CornerLogo);
        assert_eq!(CoverLayout::from_name("BANNER"), CoverLayout::Banner);
        assert_eq!(CoverLayout::from_name("mosaic"), CoverLayout::CornerLogo);
    }

    #[test]
    fn test_corner_logo_casing_and_bullets() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_cover(&request(CoverLayout::CornerLogo));

        let texts: Vec<_> = comp.text_runs().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "AI OPERATIONS FUNDAMENTALS",
                "from setup to scale",
                "• Practical Implementation",
                "• Real-World Case Studies",
                "• Measurable ROI",
                "• Hands-On Projects",
            ]
        );
    }

    #[test]
    fn test_corner_logo_positions() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_cover(&request(CoverLayout::CornerLogo));
        let ys: Vec<_> = comp.text_runs().map(|r| r.y).collect();

        // title 71, subtitle 53, points 4 * 34 + 30 = 166 -> (720 - 290) / 2
        assert_eq!(ys[0], 215);
        assert_eq!(ys[1], 215 + 71 + 20);
        assert_eq!(ys[2], 306 + 53 + 30);
        assert_eq!(ys[3] - ys[2], 34);
    }

    #[test]
    fn test_split_is_left_aligned() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_cover(&request(CoverLayout::Split));

        let logo = comp.logos().next().unwrap();
        assert_eq!((logo.max_width, logo.max_height), (Some(340), Some(432)));
        assert!(comp.text_runs().all(|r| r.x == 466));
    }

    #[test]
    fn test_overlay_has_watermark_and_no_points() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_cover(&request(CoverLayout::Overlay));

        assert!(matches!(
            comp.layers[0],
            Layer::Watermark { size: 432, opacity, .. } if opacity == 0.15
        ));
        assert!(comp.text_runs().all(|r| !r.text.starts_with(BULLET)));
        let subtitle = comp.text_runs().last().unwrap();
        assert_eq!(subtitle.fill, generator.palette.white);
        assert_eq!(subtitle.outline.map(|o| o.width), Some(3));
    }

    #[test]
    fn test_banner_band_and_text_inside() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_cover(&request(CoverLayout::Banner));

        assert_eq!(
            comp.layers[0],
            Layer::Band {
                y: 216,
                height: 288,
                color: with_alpha(generator.palette.dark_blue, 220),
            }
        );
        assert!(matches!(comp.layers[1], Layer::Logo(_)));
        for run in comp.text_runs() {
            assert_eq!(run.x, 201 + 120);
            assert!(run.y >= 216 && run.y + run.size as i64 <= 216 + 288);
            assert_eq!(run.outline, None);
        }
    }

    #[test]
    fn test_fhd_sizes() {
        let generator = BrandImageGenerator::builtin();
        let mut req = request(CoverLayout::CornerLogo);
        req.size = CoverSize::Fhd;
        let comp = generator.plan_cover(&req);
        assert_eq!((comp.width, comp.height), (1920, 1080));
        assert_eq!(comp.text_runs().next().map(|r| r.size), Some(72));
    }
}
