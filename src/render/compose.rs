//! Composition primitives: pixel blending, logo placement, outlined text,
//! translucent bands and watermarks.
//!
//! Everything composites source-over, so an opaque canvas stays opaque.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::warn;

use super::Canvas;
use crate::assets::{LogoStore, LogoVariant};
use crate::palette::{Color, with_alpha};
use crate::text::BrandFont;

/// Blend `color` into one pixel with the given coverage.
///
/// Out-of-bounds coordinates are ignored.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }

    let src_a = color.0[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for i in 0..3 {
        let c = (color.0[i] as f32 * src_a + dst.0[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst.0[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

/// Source-over composite `top` onto `canvas` with its top-left at (`x`, `y`).
pub fn composite(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    for (tx, ty, pixel) in top.enumerate_pixels() {
        blend_pixel(canvas, x + tx as i64, y + ty as i64, *pixel, 1.0);
    }
}

/// Nine named placement anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Hyphenated name, e.g. `"bottom-right"`.
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::CenterLeft => "center-left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }

    /// Parse a name; unknown names fall back to top-left.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .unwrap_or(Anchor::TopLeft)
    }

    /// Top-left corner of an `item`-sized box inside a `canvas`-sized area.
    ///
    /// Edge anchors keep `margin` from the edges they touch; centred axes
    /// ignore it.
    pub fn origin(self, canvas: (u32, u32), item: (u32, u32), margin: u32) -> (i64, i64) {
        let (cw, ch) = (canvas.0 as i64, canvas.1 as i64);
        let (iw, ih) = (item.0 as i64, item.1 as i64);
        let m = margin as i64;

        let left = m;
        let h_center = (cw - iw).div_euclid(2);
        let right = cw - iw - m;
        let top = m;
        let v_center = (ch - ih).div_euclid(2);
        let bottom = ch - ih - m;

        match self {
            Anchor::TopLeft => (left, top),
            Anchor::TopCenter => (h_center, top),
            Anchor::TopRight => (right, top),
            Anchor::CenterLeft => (left, v_center),
            Anchor::Center => (h_center, v_center),
            Anchor::CenterRight => (right, v_center),
            Anchor::BottomLeft => (left, bottom),
            Anchor::BottomCenter => (h_center, bottom),
            Anchor::BottomRight => (right, bottom),
        }
    }
}

/// Size of a `width × height` image shrunk to fit the limits, aspect
/// preserved. Never grows the image.
pub fn fit_within(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    let mut scale = 1.0f64;

    if let Some(mw) = max_width.filter(|&mw| mw > 0 && width > mw) {
        scale = scale.min(mw as f64 / width as f64);
    }
    if let Some(mh) = max_height.filter(|&mh| mh > 0 && height > mh) {
        scale = scale.min(mh as f64 / height as f64);
    }

    if scale < 1.0 {
        let w = ((width as f64 * scale) as u32).max(1);
        let h = ((height as f64 * scale) as u32).max(1);
        (w, h)
    } else {
        (width, height)
    }
}

/// Logo placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub variant: LogoVariant,
    pub anchor: Anchor,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub margin: u32,
}

impl LogoPlacement {
    /// Icon without background, default margin of 40.
    pub fn icon(anchor: Anchor) -> Self {
        Self {
            variant: LogoVariant::IconNoBg,
            anchor,
            max_width: None,
            max_height: None,
            margin: 40,
        }
    }

    /// Limit both dimensions to `size`.
    pub fn max(mut self, size: u32) -> Self {
        self.max_width = Some(size);
        self.max_height = Some(size);
        self
    }

    pub fn max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }
}

/// Composite a logo onto a copy of `canvas`.
///
/// When the variant is not loaded the copy is returned untouched.
pub fn place_logo(canvas: &Canvas, logos: &LogoStore, placement: &LogoPlacement) -> Canvas {
    let mut out = canvas.clone();
    place_logo_mut(&mut out, logos, placement);
    out
}

/// In-place variant of [`place_logo`]. Returns whether a logo was drawn.
pub fn place_logo_mut(canvas: &mut Canvas, logos: &LogoStore, placement: &LogoPlacement) -> bool {
    let Some(logo) = logos.get(placement.variant) else {
        warn!(variant = placement.variant.key(), "logo variant not available");
        return false;
    };

    let (w, h) = fit_within(logo.width(), logo.height(), placement.max_width, placement.max_height);
    let (x, y) = placement.anchor.origin(canvas.dimensions(), (w, h), placement.margin);

    if (w, h) == logo.dimensions() {
        composite(canvas, logo, x, y);
    } else {
        let scaled = imageops::resize(logo, w, h, FilterType::Lanczos3);
        composite(canvas, &scaled, x, y);
    }
    true
}

/// Draw plain text with the top of its line box at `position`.
pub fn draw_text(
    canvas: &mut Canvas,
    position: (i64, i64),
    text: &str,
    font: &BrandFont,
    fill: Color,
) {
    font.draw(canvas, position.0, position.1, text, fill);
}

/// Draw text with a simulated stroke.
///
/// The text is drawn in `outline` at every offset within
/// `±outline_width` except the origin, then once in `fill` on top.
pub fn draw_outlined_text(
    canvas: &mut Canvas,
    position: (i64, i64),
    text: &str,
    font: &BrandFont,
    fill: Color,
    outline: Color,
    outline_width: u32,
) {
    let (x, y) = position;
    let w = outline_width as i64;

    for dx in -w..=w {
        for dy in -w..=w {
            if dx != 0 || dy != 0 {
                font.draw(canvas, x + dx, y + dy, text, outline);
            }
        }
    }

    font.draw(canvas, x, y, text, fill);
}

/// Composite a full-width translucent band.
pub fn paint_band(canvas: &mut Canvas, y: i64, height: u32, color: Color) {
    if height == 0 || canvas.width() == 0 {
        return;
    }
    let band = RgbaImage::from_pixel(canvas.width(), height, color);
    composite(canvas, &band, 0, y);
}

/// Composite `logo` as a large centred watermark.
///
/// The logo is resized to `size × size` and its alpha channel is scaled
/// by `opacity` before compositing.
pub fn watermark(canvas: &mut Canvas, logo: &RgbaImage, size: u32, opacity: f32) {
    if size == 0 {
        return;
    }

    let mut faded = imageops::resize(logo, size, size, FilterType::Lanczos3);
    for pixel in faded.pixels_mut() {
        *pixel = with_alpha(*pixel, (pixel.0[3] as f32 * opacity) as u8);
    }

    let (x, y) = Anchor::Center.origin(canvas.dimensions(), (size, size), 0);
    composite(canvas, &faded, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Color = Rgba([255, 0, 0, 255]);
    const GREY: Color = Rgba([40, 40, 40, 255]);

    fn canvas() -> Canvas {
        RgbaImage::from_pixel(200, 100, GREY)
    }

    #[test]
    fn test_blend_full_and_partial() {
        let mut c = canvas();
        blend_pixel(&mut c, 0, 0, RED, 1.0);
        assert_eq!(*c.get_pixel(0, 0), RED);

        blend_pixel(&mut c, 1, 0, RED, 0.5);
        let p = c.get_pixel(1, 0);
        assert!(p.0[0] > 100 && p.0[0] < 200);
        assert_eq!(p.0[3], 255);

        blend_pixel(&mut c, -1, 500, RED, 1.0);
    }

    #[test]
    fn test_blend_onto_transparent() {
        let mut c = RgbaImage::new(1, 1);
        blend_pixel(&mut c, 0, 0, Rgba([10, 20, 30, 128]), 1.0);
        assert_eq!(*c.get_pixel(0, 0), Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn test_anchor_names() {
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_name(anchor.name()), anchor);
        }
        assert_eq!(Anchor::from_name("middle"), Anchor::TopLeft);
    }

    #[test]
    fn test_anchor_origins() {
        let area = (200, 100);
        let item = (50, 20);
        assert_eq!(Anchor::TopLeft.origin(area, item, 10), (10, 10));
        assert_eq!(Anchor::TopCenter.origin(area, item, 10), (75, 10));
        assert_eq!(Anchor::TopRight.origin(area, item, 10), (140, 10));
        assert_eq!(Anchor::CenterLeft.origin(area, item, 10), (10, 40));
        assert_eq!(Anchor::Center.origin(area, item, 10), (75, 40));
        assert_eq!(Anchor::BottomRight.origin(area, item, 10), (140, 70));
        assert_eq!(Anchor::BottomCenter.origin(area, item, 10), (75, 70));
    }

    #[test]
    fn test_anchor_oversized_item() {
        assert_eq!(Anchor::Center.origin((10, 10), (13, 13), 0), (-2, -2));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(50, 50, Some(100), Some(100)), (50, 50));
        assert_eq!(fit_within(50, 50, None, None), (50, 50));
        assert_eq!(fit_within(100, 50, Some(50), None), (50, 25));
        assert_eq!(fit_within(100, 50, Some(80), Some(20)), (40, 20));
        assert_eq!(fit_within(300, 200, Some(0), None), (300, 200));
    }

    #[test]
    fn test_place_missing_logo_is_identity() {
        let c = canvas();
        let out = place_logo(&c, &LogoStore::empty(), &LogoPlacement::icon(Anchor::Center).max(50));
        assert_eq!(out, c);
    }

    #[test]
    fn test_place_logo_copies_and_composites() {
        let c = canvas();
        let icon = RgbaImage::from_pixel(20, 20, RED);
        let logos = LogoStore::empty().with_logo(LogoVariant::IconNoBg, icon);
        let out = place_logo(&c, &logos, &LogoPlacement::icon(Anchor::TopLeft).margin(5));

        assert_eq!(*c.get_pixel(5, 5), GREY, "input must not change");
        assert_eq!(*out.get_pixel(5, 5), RED);
        assert_eq!(*out.get_pixel(24, 24), RED);
        assert_eq!(*out.get_pixel(25, 25), GREY);
    }

    #[test]
    fn test_place_logo_scales_down() {
        let c = canvas();
        let icon = RgbaImage::from_pixel(100, 50, RED);
        let logos = LogoStore::empty().with_logo(LogoVariant::IconNoBg, icon);
        let out = place_logo(&c, &logos, &LogoPlacement::icon(Anchor::TopLeft).max(50).margin(0));

        let inside = out.get_pixel(25, 12);
        assert!(inside.0[0] > 250 && inside.0[1] < 5);
        assert_eq!(*out.get_pixel(60, 5), GREY);
        assert_eq!(*out.get_pixel(5, 30), GREY);
    }

    #[test]
    fn test_outline_reaches_exactly_width() {
        let font = BrandFont::builtin(24);
        let white = Rgba([255, 255, 255, 255]);
        let w = 2i64;

        let mut plain = RgbaImage::from_pixel(60, 60, GREY);
        draw_text(&mut plain, (20, 18), "I", &font, white);
        let ink: Vec<(i64, i64)> = plain
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == white)
            .map(|(x, y, _)| (x as i64, y as i64))
            .collect();
        assert!(!ink.is_empty());

        let mut c = RgbaImage::from_pixel(60, 60, GREY);
        draw_outlined_text(&mut c, (20, 18), "I", &font, white, RED, w as u32);

        // Stroke is the square neighbourhood of the ink, nothing further
        for (x, y, p) in c.enumerate_pixels() {
            let (x, y) = (x as i64, y as i64);
            let distance = ink
                .iter()
                .map(|&(ix, iy)| (ix - x).abs().max((iy - y).abs()))
                .min()
                .unwrap_or(i64::MAX);
            let expected = match distance {
                0 => white,
                d if d <= w => RED,
                _ => GREY,
            };
            assert_eq!(*p, expected, "({}, {}) at distance {}", x, y, distance);
        }

        let &(left_x, left_y) = ink.iter().min_by_key(|(x, _)| *x).unwrap();
        let &(right_x, right_y) = ink.iter().max_by_key(|(x, _)| *x).unwrap();
        let px = |x: i64, y: i64| *c.get_pixel(x as u32, y as u32);
        assert_eq!(px(left_x - w, left_y), RED);
        assert_eq!(px(left_x - w - 1, left_y), GREY);
        assert_eq!(px(right_x + w, right_y), RED);
        assert_eq!(px(right_x + w + 1, right_y), GREY);
    }

    #[test]
    fn test_zero_outline_is_plain_text() {
        let font = BrandFont::builtin(24);
        let mut a = RgbaImage::from_pixel(80, 40, GREY);
        let mut b = a.clone();
        draw_outlined_text(&mut a, (4, 4), "ok", &font, RED, GREY, 0);
        draw_text(&mut b, (4, 4), "ok", &font, RED);
        assert_eq!(a, b);
    }

    #[test]
    fn test_band_is_translucent_and_opaque_result() {
        let mut c = canvas();
        paint_band(&mut c, 40, 20, Rgba([13, 44, 74, 220]));
        let inside = c.get_pixel(100, 50);
        assert_ne!(*inside, GREY);
        assert_eq!(inside.0[3], 255);
        assert_eq!(*c.get_pixel(100, 30), GREY);
    }

    #[test]
    fn test_watermark_is_faint() {
        let mut c = canvas();
        watermark(&mut c, &RgbaImage::from_pixel(10, 10, RED), 60, 0.15);
        let center = c.get_pixel(100, 50);
        assert!(center.0[0] > GREY.0[0] && center.0[0] < 100);
        assert_eq!(*c.get_pixel(5, 5), GREY);
    }
}
