//! Email newsletter headers.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::BrandImageGenerator;
use crate::error::Result;
use crate::layout::{Column, Composition, HeaderSize, Layer, TextBlock, TextStack};
use crate::render::Canvas;
use crate::render::compose::{Anchor, LogoPlacement};

/// Header layout styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HeaderLayout {
    /// Icon top-centre, text centred below it
    #[default]
    Centered,
    /// Icon on the left, left-aligned text column
    Left,
    /// Small corner icon, large centred title
    Minimal,
}

impl HeaderLayout {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "centered" => HeaderLayout::Centered,
            "left" => HeaderLayout::Left,
            "minimal" => HeaderLayout::Minimal,
            other => {
                debug!(layout = other, "unknown header layout, using centered");
                HeaderLayout::Centered
            }
        }
    }
}

impl From<String> for HeaderLayout {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Parameters for one email header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeaderRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub layout: HeaderLayout,
    pub size: HeaderSize,
}

impl HeaderRequest {
    fn subtitle(&self) -> Option<String> {
        self.subtitle.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_lowercase)
    }
}

impl BrandImageGenerator {
    /// Lay out an email header.
    pub fn plan_header(&self, request: &HeaderRequest) -> Composition {
        let (width, height) = request.size.preset().dimensions();
        let mut comp = Composition::new(width, height);

        match request.layout {
            HeaderLayout::Centered => self.header_centered(&mut comp, request),
            HeaderLayout::Left => self.header_left(&mut comp, request),
            HeaderLayout::Minimal => self.header_minimal(&mut comp, request),
        }

        comp
    }

    pub fn header(&self, request: &HeaderRequest) -> Canvas {
        self.render(&self.plan_header(request))
    }

    /// Render an email header and save it to `path`.
    pub fn generate_header(
        &self,
        request: &HeaderRequest,
        path: impl AsRef<Path>,
    ) -> Result<Canvas> {
        self.save(&self.plan_header(request), path.as_ref())
    }

    fn header_centered(&self, comp: &mut Composition, request: &HeaderRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1000;
        comp.push(Layer::Logo(LogoPlacement::icon(Anchor::TopCenter).max(150).margin(30)));

        let top = 150 + 30;
        let max_width = (width as f64 * 0.85) as u32;
        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_lowercase(),
            if wide { 64 } else { 42 },
            true,
            max_width,
            10,
        );
        let subtitle_size = if wide { 28 } else { 20 };
        let subtitle = request
            .subtitle()
            .map(|text| TextBlock::wrapped(&self.fonts, &text, subtitle_size, false, max_width, 5));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 20);
        }

        let mut stack = TextStack::centered(
            Column::Centered { width },
            top,
            height as i64 - top - 40,
            &reserved,
        );
        stack.block(&title, self.palette.brand_orange, self.outline(3));
        if let Some(sub) = &subtitle {
            stack.gap(15);
            stack.block(sub, self.palette.white, None);
        }
        stack.finish(comp);
    }

    fn header_left(&self, comp: &mut Composition, request: &HeaderRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1000;
        let margin = 50;
        comp.push(Layer::Logo(LogoPlacement::icon(Anchor::CenterLeft).max(200).margin(margin)));

        let x = 200 + margin * 2;
        let column_width = width.saturating_sub(x + margin);
        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_lowercase(),
            if wide { 56 } else { 36 },
            true,
            column_width,
            10,
        );
        let subtitle_size = if wide { 24 } else { 18 };
        let subtitle = request.subtitle().map(|text| {
            TextBlock::wrapped(&self.fonts, &text, subtitle_size, false, column_width, 5)
        });

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.height() + 20);
        }

        let column = Column::Left { x: x as i64 };
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(2));
        if let Some(sub) = &subtitle {
            stack.gap(10);
            stack.block(sub, self.palette.white, None);
        }
        stack.finish(comp);
    }

    fn header_minimal(&self, comp: &mut Composition, request: &HeaderRequest) {
        let (width, height) = (comp.width, comp.height);
        let wide = width >= 1000;
        comp.push(Layer::Logo(LogoPlacement::icon(Anchor::TopLeft).max(100).margin(30)));

        let title = TextBlock::wrapped(
            &self.fonts,
            &request.title.to_lowercase(),
            if wide { 72 } else { 48 },
            true,
            (width as f64 * 0.8) as u32,
            15,
        );
        let subtitle_size = if wide { 30 } else { 22 };
        let subtitle = request
            .subtitle()
            .map(|text| TextBlock::single(&self.fonts, &text, subtitle_size, false, 0));

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 20);
        }

        let column = Column::Centered { width };
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(3));
        if let Some(sub) = &subtitle {
            stack.gap(20);
            stack.block(sub, self.palette.white, None);
        }
        stack.finish(comp);
    }
}
