//! Social media posts and profile pictures.
//!
//! Post text is lower-cased. Announcement and stat posts read a second
//! line from the message (`"title\nsubtitle"`, `"78%\ncontext"`).

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::BrandImageGenerator;
use crate::error::Result;
use crate::layout::presets::{self, DEFAULT_PLATFORM};
use crate::layout::{Column, Composition, Layer, TextBlock, TextStack, scale_font_size};
use crate::render::Canvas;
use crate::render::compose::{Anchor, LogoPlacement};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SocialStyle {
    /// Large centred quote
    #[default]
    Quote,
    /// Title with an optional second line
    Announcement,
    /// "TIP" label over a body of text
    Tip,
    /// Huge number with a line of context
    Stat,
}

impl SocialStyle {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "quote" => SocialStyle::Quote,
            "announcement" => SocialStyle::Announcement,
            "tip" => SocialStyle::Tip,
            "stat" => SocialStyle::Stat,
            other => {
                debug!(style = other, "unknown social style, using quote");
                SocialStyle::Quote
            }
        }
    }
}

impl From<String> for SocialStyle {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Parameters for one social post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SocialPostRequest {
    pub message: String,
    pub platform: String,
    pub style: SocialStyle,
    /// Slot name within the platform, e.g. `square` or `post`
    pub size: String,
    pub include_logo: bool,
}

impl Default for SocialPostRequest {
    fn default() -> Self {
        Self {
            message: String::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            style: SocialStyle::Quote,
            size: "square".to_string(),
            include_logo: true,
        }
    }
}

/// Parameters for a profile picture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub platform: String,
}

impl Default for ProfileRequest {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

impl BrandImageGenerator {
    /// Lay out a social post.
    pub fn plan_social(&self, request: &SocialPostRequest) -> Composition {
        let (width, height) = presets::platform_size(&request.platform, &request.size).dimensions();
        let mut comp = Composition::new(width, height);

        match request.style {
            SocialStyle::Quote => self.social_quote(&mut comp, request),
            SocialStyle::Announcement => self.social_announcement(&mut comp, request),
            SocialStyle::Tip => self.social_tip(&mut comp, request),
            SocialStyle::Stat => self.social_stat(&mut comp, request),
        }

        comp
    }

    pub fn social(&self, request: &SocialPostRequest) -> Canvas {
        self.render(&self.plan_social(request))
    }

    /// Render a social post and save it to `path`.
    pub fn generate_social(
        &self,
        request: &SocialPostRequest,
        path: impl AsRef<Path>,
    ) -> Result<Canvas> {
        self.save(&self.plan_social(request), path.as_ref())
    }

    /// Lay out a profile picture: the icon centred at 80% of the canvas.
    pub fn plan_profile(&self, request: &ProfileRequest) -> Composition {
        let (width, height) = presets::platform(&request.platform).profile().dimensions();
        let max_width = (width as f64 * 0.8) as u32;
        let max_height = (height as f64 * 0.8) as u32;
        let mut comp = Composition::new(width, height);
        comp.push(Layer::Logo(
            LogoPlacement::icon(Anchor::Center).max_size(max_width, max_height),
        ));
        comp
    }

    pub fn profile(&self, request: &ProfileRequest) -> Canvas {
        self.render(&self.plan_profile(request))
    }

    /// Render a profile picture and save it to `path`.
    pub fn generate_profile(
        &self,
        request: &ProfileRequest,
        path: impl AsRef<Path>,
    ) -> Result<Canvas> {
        self.save(&self.plan_profile(request), path.as_ref())
    }

    /// Corner logo sized as a fraction of the shorter side.
    fn corner_logo(
        comp: &mut Composition,
        request: &SocialPostRequest,
        anchor: Anchor,
        divisor: u32,
        margin: u32,
    ) -> u32 {
        let size = comp.width.min(comp.height) / divisor;
        if request.include_logo {
            comp.push(Layer::Logo(LogoPlacement::icon(anchor).max(size).margin(margin)));
        }
        size
    }

    fn social_quote(&self, comp: &mut Composition, request: &SocialPostRequest) {
        let (width, height) = (comp.width, comp.height);
        Self::corner_logo(comp, request, Anchor::BottomRight, 6, 30);

        let size = scale_font_size(width, 48, 64, 80);
        let quote = TextBlock::wrapped(
            &self.fonts,
            &request.message.to_lowercase(),
            size,
            true,
            (width as f64 * 0.85) as u32,
            size / 3,
        );

        let column = Column::Centered { width };
        let mut stack = TextStack::centered(column, 0, height as i64, &[quote.height()]);
        stack.block(&quote, self.palette.brand_orange, self.outline(3));
        stack.finish(comp);
    }

    fn social_announcement(&self, comp: &mut Composition, request: &SocialPostRequest) {
        let (width, height) = (comp.width, comp.height);
        let logo_size = Self::corner_logo(comp, request, Anchor::TopCenter, 5, 40);

        let mut parts = request.message.split('\n');
        let title_text = parts.next().unwrap_or_default().to_lowercase();
        let subtitle_text = parts.next().filter(|s| !s.is_empty()).map(str::to_lowercase);

        let max_width = (width as f64 * 0.85) as u32;
        let title_size = scale_font_size(width, 56, 72, 90);
        let title = TextBlock::wrapped(&self.fonts, &title_text, title_size, true, max_width, 15);
        let subtitle_size = scale_font_size(width, 32, 40, 48);
        let subtitle = subtitle_text.map(|text| {
            TextBlock::wrapped(&self.fonts, &text, subtitle_size, false, max_width, 10)
        });

        let mut reserved = vec![title.height()];
        if let Some(sub) = &subtitle {
            reserved.push(sub.size() + 30);
        }

        let top = (if request.include_logo { logo_size as i64 } else { 0 }) + 80;
        let column = Column::Centered { width };
        let mut stack = TextStack::centered(column, top, height as i64 - top, &reserved);
        stack.block(&title, self.palette.brand_orange, self.outline(3));
        if let Some(sub) = &subtitle {
            stack.gap(25);
            stack.block(sub, self.palette.white, None);
        }
        stack.finish(comp);
    }

    fn social_tip(&self, comp: &mut Composition, request: &SocialPostRequest) {
        let (width, height) = (comp.width, comp.height);
        Self::corner_logo(comp, request, Anchor::TopLeft, 6, 30);

        let column = Column::Centered { width };
        let label_size = scale_font_size(width, 36, 48, 60);
        let label = TextBlock::single(&self.fonts, "TIP", label_size, true, 0);
        let mut label_stack = TextStack::at(column, height as i64 / 6);
        label_stack.block(&label, self.palette.brand_orange, None);
        label_stack.finish(comp);

        let size = scale_font_size(width, 40, 52, 64);
        let body = TextBlock::wrapped(
            &self.fonts,
            &request.message.to_lowercase(),
            size,
            false,
            (width as f64 * 0.85) as u32,
            size / 4,
        );

        let mut stack = TextStack::centered(column, 40, height as i64, &[body.height()]);
        stack.block(&body, self.palette.white, self.outline(2));
        stack.finish(comp);
    }

    fn social_stat(&self, comp: &mut Composition, request: &SocialPostRequest) {
        let (width, height) = (comp.width, comp.height);
        Self::corner_logo(comp, request, Anchor::BottomRight, 7, 30);

        let (stat_text, context_text) = match request.message.split_once('\n') {
            Some((stat, context)) => (stat.trim(), context.trim()),
            None => (request.message.trim(), ""),
        };

        let stat_size = scale_font_size(width, 120, 160, 200);
        let stat = TextBlock::single(&self.fonts, stat_text, stat_size, true, 0);
        let stat_height = stat.font.measure(stat_text).1;
        let context = TextBlock::wrapped(
            &self.fonts,
            &context_text.to_lowercase(),
            scale_font_size(width, 32, 40, 48),
            false,
            (width as f64 * 0.85) as u32,
            10,
        );

        let column = Column::Centered { width };
        let reserved = [stat_height, 40, context.height()];
        let mut stack = TextStack::centered(column, 0, height as i64, &reserved);
        let context_top = stack.cursor() + stat_height as i64 + 40;
        stack.block(&stat, self.palette.brand_orange, self.outline(4));
        stack.finish(comp);

        let mut stack = TextStack::at(column, context_top);
        stack.block(&context, self.palette.white, None);
        stack.finish(comp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(message: &str, platform: &str, style: SocialStyle, size: &str) -> SocialPostRequest {
        SocialPostRequest {
            message: message.into(),
            platform: platform.into(),
            style,
            size: size.into(),
            include_logo: true,
        }
    }

    #[test]
    fn test_request_defaults() {
        let req: SocialPostRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.platform, "instagram");
        assert_eq!(req.size, "square");
        assert!(req.include_logo);
        assert_eq!(SocialStyle::from_name("poll"), SocialStyle::Quote);
    }

    #[test]
    fn test_quote_logo_and_spacing() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_social(&post(
            "AI doesn't have to be complicated to be powerful",
            "instagram",
            SocialStyle::Quote,
            "square",
        ));

        let logo = comp.logos().next().unwrap();
        assert_eq!(
            (logo.anchor, logo.max_width, logo.margin),
            (Anchor::BottomRight, Some(180), 30)
        );

        let runs: Vec<_> = comp.text_runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].y - runs[0].y, 64 + 21);
        // (1080 - 170) / 2
        assert_eq!(runs[0].y, 455);
    }

    #[test]
    fn test_announcement_two_lines() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_social(&post(
            "New Course Launch\nEnroll Now",
            "linkedin",
            SocialStyle::Announcement,
            "post",
        ));

        assert_eq!((comp.width, comp.height), (1200, 627));
        let runs: Vec<_> = comp.text_runs().collect();
        assert_eq!(runs.first().map(|r| r.text.as_str()), Some("new course launch"));
        assert_eq!(runs.last().map(|r| r.text.as_str()), Some("enroll now"));
        // Logo 125 + 80 reserved above the stack
        assert!(runs[0].y >= 205);
        assert_eq!(runs[0].size, 90);
        assert_eq!(runs.last().map(|r| r.size), Some(48));
    }

    #[test]
    fn test_announcement_without_logo() {
        let generator = BrandImageGenerator::builtin();
        let mut req = post("Launch", "instagram", SocialStyle::Announcement, "square");
        req.include_logo = false;
        let comp = generator.plan_social(&req);

        assert_eq!(comp.logos().count(), 0);
        // 80 + (1000 - 87) / 2
        assert_eq!(comp.text_runs().next().map(|r| r.y), Some(536));
    }

    #[test]
    fn test_tip_label_and_body() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_social(&post(
            "Start with one automated process. Master it. Then scale.",
            "twitter",
            SocialStyle::Tip,
            "post",
        ));

        let runs: Vec<_> = comp.text_runs().collect();
        assert_eq!(runs[0].text, "TIP");
        assert_eq!(runs[0].y, 675 / 6);
        assert_eq!(runs[0].size, 60);
        for body in &runs[1..] {
            assert_eq!(body.fill, generator.palette.white);
            assert!(!body.bold);
            assert_eq!(body.outline.map(|o| o.width), Some(2));
        }
    }

    #[test]
    fn test_stat_layout() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_social(&post(
            "78%\nof businesses still struggle",
            "instagram",
            SocialStyle::Stat,
            "square",
        ));

        let runs: Vec<_> = comp.text_runs().collect();
        assert_eq!(runs[0].text, "78%");
        assert_eq!(runs[0].size, 160);
        assert_eq!(runs[1].y, runs[0].y + 160 + 40);
        assert_eq!(runs[1].text, "of businesses still struggle");
    }

    #[test]
    fn test_stat_without_context() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_social(&post("42", "facebook", SocialStyle::Stat, "post"));
        let runs: Vec<_> = comp.text_runs().collect();
        assert_eq!(runs.len(), 1);
        // (630 - 200 - 40) / 2
        assert_eq!(runs[0].y, 195);
    }

    #[test]
    fn test_profile_plan() {
        let generator = BrandImageGenerator::builtin();
        let comp = generator.plan_profile(&ProfileRequest {
            platform: "Facebook".into(),
        });
        assert_eq!((comp.width, comp.height), (180, 180));
        let logo = comp.logos().next().unwrap();
        assert_eq!(
            (logo.anchor, logo.max_width, logo.max_height),
            (Anchor::Center, Some(144), Some(144))
        );
    }
}
