//! Raster output: PNG keeps alpha, JPEG is flattened onto white first.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use super::Canvas;
use crate::error::Result;
use crate::palette::{Color, Palette};

/// JPEG quality used for every JPEG written.
pub const JPEG_QUALITY: u8 = 90;

/// Encoded file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// `.jpg`/`.jpeg` (any case) means JPEG, anything else PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "jpg" || ext == "jpeg" => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }

    /// Parse `"png"`/`"jpeg"`/`"jpg"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Composite every pixel over an opaque `background`.
pub fn flatten(canvas: &Canvas, background: Color) -> RgbImage {
    let mut out = RgbImage::new(canvas.width(), canvas.height());
    for (x, y, p) in canvas.enumerate_pixels() {
        let a = p.0[3] as f32 / 255.0;
        let mix = |i: usize| (p.0[i] as f32 * a + background.0[i] as f32 * (1.0 - a)).round() as u8;
        out.put_pixel(x, y, Rgb([mix(0), mix(1), mix(2)]));
    }
    out
}

/// Write `canvas` to `path` in the format implied by its extension.
pub fn save(canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    save_as(canvas, path, OutputFormat::from_path(path))
}

/// Write `canvas` to `path` as `format`.
pub fn save_as(canvas: &Canvas, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    let (width, height) = canvas.dimensions();

    match format {
        OutputFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
            encoder.write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten(canvas, Palette::BRAND.white);
            let mut encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
            encoder.encode_image(&rgb)?;
        }
    }

    info!(path = %path.display(), width, height, ?format, "saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba, RgbaImage};

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name("JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("gif"), None);
    }

    #[test]
    fn test_flatten() {
        let mut canvas = RgbaImage::new(2, 1);
        canvas.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let rgb = flatten(&canvas, Rgba([255, 255, 255, 255]));
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(1, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_transparent_jpeg_is_white() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clear.jpg");
        save(&RgbaImage::new(16, 16), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert!(decoded.to_rgb8().pixels().all(|p| p.0.iter().all(|&c| c >= 250)));
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        let canvas = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 77]));
        save(&canvas, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), canvas);
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let canvas = RgbaImage::new(1, 1);
        assert!(save(&canvas, "/nonexistent-dir/out.png").is_err());
    }
}
