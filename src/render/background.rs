//! # Blueprint Background
//!
//! Technical-drawing backdrop used under every product image.
//!
//! ## Description
//!
//! A solid `brand_blue` fill with a translucent overlay in `pattern_blue`:
//! - A regular grid of 1 px lines every `grid_size` pixels
//! - 5×5 "circuit" nodes every `3 × grid_size`, each with a short trace
//!   running `grid_size` to the right
//! - Rounded chip outlines (`2 × grid_size` square, radius 5) every
//!   `5 × grid_size`, only where the whole box fits
//!
//! The overlay is drawn opaque-in-itself and composited once, so
//! overlapping elements never stack their alpha. Output depends only on
//! the parameters.

use image::RgbaImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use super::Canvas;
use super::compose::composite;
use crate::palette::{Color, Palette, with_alpha};

/// Parameters for the blueprint pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Grid spacing in pixels. Default: 40
    pub grid_size: u32,
    /// Alpha of the pattern lines, 0-255. Default: 50
    pub opacity: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            grid_size: 40,
            opacity: 50,
        }
    }
}

/// Half-size of a circuit node (nodes span ±2 px).
const NODE_HALF: i32 = 2;
/// Corner radius of the chip outlines.
const BOX_RADIUS: i32 = 5;

/// Render the blueprint background with the brand palette.
pub fn generate_background(width: u32, height: u32, params: &Params) -> Canvas {
    blueprint(width, height, params, &Palette::BRAND)
}

/// Render the blueprint background with an explicit palette.
pub fn blueprint(width: u32, height: u32, params: &Params, palette: &Palette) -> Canvas {
    let width = width.max(1);
    let height = height.max(1);
    let grid = params.grid_size.max(1);
    let line = with_alpha(palette.pattern_blue, params.opacity);

    let mut base = RgbaImage::from_pixel(width, height, palette.brand_blue);
    let mut overlay = RgbaImage::new(width, height);

    draw_grid(&mut overlay, grid, line);
    draw_nodes(&mut overlay, grid, line);
    draw_chips(&mut overlay, grid, line);

    composite(&mut base, &overlay, 0, 0);
    base
}

fn draw_grid(img: &mut RgbaImage, grid: u32, color: Color) {
    let (w, h) = (img.width() as f32, img.height() as f32);

    for x in (0..img.width()).step_by(grid as usize) {
        draw_line_segment_mut(img, (x as f32, 0.0), (x as f32, h), color);
    }
    for y in (0..img.height()).step_by(grid as usize) {
        draw_line_segment_mut(img, (0.0, y as f32), (w, y as f32), color);
    }
}

fn draw_nodes(img: &mut RgbaImage, grid: u32, color: Color) {
    // A step wider than the canvas saturates to a single node per axis
    let step = grid.saturating_mul(3);
    let side = (NODE_HALF * 2 + 1) as u32;

    for x in (0..img.width()).step_by(step as usize) {
        for y in (0..img.height()).step_by(step as usize) {
            let rect = Rect::at(x as i32 - NODE_HALF, y as i32 - NODE_HALF).of_size(side, side);
            draw_filled_rect_mut(img, rect, color);

            if x.saturating_add(step) < img.width() {
                let end = x.saturating_add(grid) as f32;
                draw_line_segment_mut(img, (x as f32, y as f32), (end, y as f32), color);
            }
        }
    }
}

fn draw_chips(img: &mut RgbaImage, grid: u32, color: Color) {
    let step = grid.saturating_mul(5);
    let size = grid.saturating_mul(2);

    for x in (0..img.width()).step_by(step as usize) {
        for y in (0..img.height()).step_by(step as usize) {
            let (right, bottom) = (x.saturating_add(size), y.saturating_add(size));
            if right < img.width() && bottom < img.height() {
                let (x0, y0) = (x as i32, y as i32);
                rounded_outline(img, x0, y0, right as i32, bottom as i32, BOX_RADIUS, color);
            }
        }
    }
}

/// Points of one quadrant of a circle of radius `r` (midpoint algorithm).
fn quarter_circle(r: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let (mut x, mut y, mut err) = (r, 0, 1 - r);

    while x >= y {
        points.push((x, y));
        points.push((y, x));
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    points
}

/// 1 px rounded rectangle outline with corners inclusive.
fn rounded_outline(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, r: i32, color: Color) {
    let r = r.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0);
    let (l, t, rt, b) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
    let rf = r as f32;

    draw_line_segment_mut(img, (l + rf, t), (rt - rf, t), color);
    draw_line_segment_mut(img, (l + rf, b), (rt - rf, b), color);
    draw_line_segment_mut(img, (l, t + rf), (l, b - rf), color);
    draw_line_segment_mut(img, (rt, t + rf), (rt, b - rf), color);

    let corners = [
        (x0 + r, y0 + r, -1, -1),
        (x1 - r, y0 + r, 1, -1),
        (x0 + r, y1 - r, -1, 1),
        (x1 - r, y1 - r, 1, 1),
    ];
    for (dx, dy) in quarter_circle(r) {
        for &(cx, cy, sx, sy) in &corners {
            let (px, py) = (cx + sx * dx, cy + sy * dy);
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
