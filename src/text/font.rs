//! Font handles and the font resolution chain.
//!
//! A [`FontBook`] resolves one face per weight once, when the generator is
//! built. Asking it for a [`BrandFont`] is then just pairing that face with
//! a pixel size, and never fails: when no outline font could be found the
//! built-in bitmap face is used instead.
//!
//! Resolution order for each weight:
//!
//! 1. Preferred brand families (Montserrat, Inter, Poppins), unless the
//!    book was built in fallback-only mode
//! 2. Platform default fonts (Helvetica, SF, Arial, DejaVu, Liberation)
//! 3. The built-in Spleen bitmap face
//!
//! Candidates are looked up in a [`fontdb::Database`] holding the
//! configured font directories and, unless disabled, the system fonts.

use ab_glyph::{Font, FontArc, FontVec, Glyph, GlyphId, PxScale, ScaleFont, point};
use fontdb::{Database, FaceInfo, Source};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::builtin;
use crate::config::GeneratorConfig;
use crate::palette::Color;
use crate::render::compose::blend_pixel;

/// Preferred bold faces, in order.
pub const PREFERRED_BOLD: &[&str] = &[
    "Montserrat-Black.ttf",
    "Montserrat-Bold.ttf",
    "Inter-Bold.ttf",
    "Poppins-Bold.ttf",
];

/// Preferred regular faces, in order.
pub const PREFERRED_REGULAR: &[&str] = &[
    "Montserrat-Regular.ttf",
    "Inter-Regular.ttf",
    "Poppins-Regular.ttf",
];

/// Platform defaults tried for both weights after the preferred faces.
pub const PLATFORM_DEFAULTS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNSDisplay.ttf",
    "Arial.ttf",
    "arial.ttf",
];

const LINUX_BOLD: &[&str] = &["DejaVuSans-Bold.ttf", "LiberationSans-Bold.ttf"];
const LINUX_REGULAR: &[&str] = &["DejaVuSans.ttf", "LiberationSans-Regular.ttf"];

#[derive(Clone)]
enum Face {
    Outline(FontArc),
    Builtin,
}

/// A font face at a fixed pixel size.
///
/// `size` is the em size in pixels, so a 64 px font has 64 px between
/// the top of an em box and its bottom, the same for every face.
#[derive(Clone)]
pub struct BrandFont {
    face: Face,
    size: u32,
}

impl std::fmt::Debug for BrandFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandFont")
            .field("builtin", &self.is_builtin())
            .field("size", &self.size)
            .finish()
    }
}

impl BrandFont {
    /// The built-in bitmap face at `size` px.
    pub fn builtin(size: u32) -> Self {
        Self {
            face: Face::Builtin,
            size,
        }
    }

    /// An outline face at `size` px.
    pub fn outline(font: FontArc, size: u32) -> Self {
        Self {
            face: Face::Outline(font),
            size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// Pixel bounding box (width, height) of `text`.
    ///
    /// Outline faces report the ink box; the built-in face reports its
    /// advance box. Empty text measures `(0, 0)`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match &self.face {
            Face::Builtin => builtin::measure(text, self.size),
            Face::Outline(font) => {
                let mut bounds: Option<(f32, f32, f32, f32)> = None;
                for glyph in layout(font, self.size, text) {
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let b = outlined.px_bounds();
                        bounds = Some(match bounds {
                            None => (b.min.x, b.min.y, b.max.x, b.max.y),
                            Some((x0, y0, x1, y1)) => {
                                (x0.min(b.min.x), y0.min(b.min.y), x1.max(b.max.x), y1.max(b.max.y))
                            }
                        });
                    }
                }
                match bounds {
                    Some((x0, y0, x1, y1)) => ((x1 - x0).ceil() as u32, (y1 - y0).ceil() as u32),
                    None => (0, 0),
                }
            }
        }
    }

    /// Draw `text` at (`x`, `y`), the top of the line box.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Color) {
        match &self.face {
            Face::Builtin => builtin::draw(canvas, x, y, text, self.size, color),
            Face::Outline(font) => {
                for glyph in layout(font, self.size, text) {
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let b = outlined.px_bounds();
                        let left = x + b.min.x.floor() as i64;
                        let top = y + b.min.y.floor() as i64;
                        outlined.draw(|gx, gy, coverage| {
                            blend_pixel(canvas, left + gx as i64, top + gy as i64, color, coverage);
                        });
                    }
                }
            }
        }
    }
}

/// Scale that makes one em exactly `size` pixels.
fn em_scale(font: &FontArc, size: u32) -> PxScale {
    let px = size as f32;
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(px * font.height_unscaled() / upem),
        _ => PxScale::from(px),
    }
}

/// Position glyphs on a single line with the baseline at the ascent.
fn layout(font: &FontArc, size: u32, text: &str) -> Vec<Glyph> {
    let scale = em_scale(font, size);
    let scaled = font.as_scaled(scale);
    let baseline = scaled.ascent();

    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    glyphs
}

#[derive(Clone)]
struct ResolvedFace {
    font: FontArc,
    path: PathBuf,
}

/// One resolved face per weight.
#[derive(Clone, Default)]
pub struct FontBook {
    regular: Option<ResolvedFace>,
    bold: Option<ResolvedFace>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("regular", &self.describe(false))
            .field("bold", &self.describe(true))
            .finish()
    }
}

impl FontBook {
    /// A book that only has the built-in face.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Run the resolution chain for both weights.
    pub fn discover(config: &GeneratorConfig) -> Self {
        let db = font_database(config);
        Self {
            regular: resolve(false, &db, config.fallback_only),
            bold: resolve(true, &db, config.fallback_only),
        }
    }

    /// Use an already-parsed face for one weight.
    pub fn with_face(mut self, bold: bool, font: FontArc) -> Self {
        let face = Some(ResolvedFace {
            font,
            path: PathBuf::from("<memory>"),
        });
        if bold {
            self.bold = face;
        } else {
            self.regular = face;
        }
        self
    }

    /// A font at `size` px. Total: falls back to the built-in face.
    pub fn font(&self, size: u32, bold: bool) -> BrandFont {
        let face = if bold { &self.bold } else { &self.regular };
        match face {
            Some(resolved) => BrandFont::outline(resolved.font.clone(), size),
            None => BrandFont::builtin(size),
        }
    }

    /// Path of the face used for a weight, or `"builtin"`.
    pub fn describe(&self, bold: bool) -> String {
        let face = if bold { &self.bold } else { &self.regular };
        match face {
            Some(resolved) => resolved.path.display().to_string(),
            None => "builtin".to_string(),
        }
    }
}

/// Candidate file names for a weight, in resolution order.
pub fn candidates(bold: bool, fallback_only: bool) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    if !fallback_only {
        names.extend(if bold { PREFERRED_BOLD } else { PREFERRED_REGULAR });
    }
    names.extend(PLATFORM_DEFAULTS);
    names.extend(if bold { LINUX_BOLD } else { LINUX_REGULAR });
    names
}

/// Index the configured font directories, then the system fonts.
///
/// Faces iterate in load order, so the configured directories win over
/// system copies of the same file.
pub fn font_database(config: &GeneratorConfig) -> Database {
    let mut db = Database::new();
    for dir in config.font_search_dirs() {
        if dir.is_dir() {
            db.load_fonts_dir(&dir);
        }
    }
    let local = db.len();

    if config.system_fonts {
        db.load_system_fonts();
    }

    debug!(local, total = db.len(), "indexed fonts");
    db
}

fn resolve(bold: bool, db: &Database, fallback_only: bool) -> Option<ResolvedFace> {
    let weight = if bold { "bold" } else { "regular" };

    for name in candidates(bold, fallback_only) {
        let found = db.faces().find_map(|face| {
            let path = face_path(face)?;
            matches_candidate(path, name).then(|| (face, path.to_path_buf()))
        });
        let Some((face, path)) = found else {
            debug!(weight, name, "font not found");
            continue;
        };

        match load_face(db, face) {
            Ok(font) => {
                debug!(weight, path = %path.display(), index = face.index, "resolved font");
                return Some(ResolvedFace { font, path });
            }
            Err(e) => warn!(weight, path = %path.display(), "unusable font: {}", e),
        }
    }

    debug!(weight, "no outline font available, using built-in face");
    None
}

fn face_path(face: &FaceInfo) -> Option<&Path> {
    match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => Some(path.as_path()),
        _ => None,
    }
}

/// Absolute candidates match the exact path; bare names match the file
/// name in any indexed directory.
fn matches_candidate(path: &Path, name: &str) -> bool {
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        path == candidate
    } else {
        path.file_name().is_some_and(|file| file == name)
    }
}

fn load_face(db: &Database, face: &FaceInfo) -> Result<FontArc, String> {
    db.with_face_data(face.id, |data, index| FontVec::try_from_vec_and_index(data.to_vec(), index))
        .ok_or_else(|| "face data unavailable".to_string())?
        .map(FontArc::new)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_book_always_yields_font() {
        let book = FontBook::builtin();
        for bold in [false, true] {
            for size in [1, 12, 20, 64, 200] {
                let font = book.font(size, bold);
                assert!(font.is_builtin());
                assert_eq!(font.size(), size);
            }
        }
        assert_eq!(book.describe(true), "builtin");
    }

    #[test]
    fn test_discover_with_no_fonts_anywhere() {
        let empty = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            assets_dir: empty.path().to_path_buf(),
            font_dirs: vec![empty.path().to_path_buf()],
            fallback_only: false,
            system_fonts: false,
        };
        let book = FontBook::discover(&config);
        let font = book.font(48, true);
        assert!(font.measure("still renders").0 > 0);
    }

    #[test]
    fn test_corrupt_font_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Montserrat-Black.ttf"), b"garbage").unwrap();
        let config = GeneratorConfig {
            assets_dir: dir.path().to_path_buf(),
            font_dirs: vec![dir.path().to_path_buf()],
            fallback_only: false,
            system_fonts: false,
        };
        let book = FontBook::discover(&config);
        let garbage = dir.path().join("Montserrat-Black.ttf");
        assert_ne!(book.describe(true), garbage.display().to_string());
        assert!(book.font(30, true).measure("ok").0 > 0);
    }

    #[test]
    fn test_candidates_order() {
        let bold = candidates(true, false);
        assert_eq!(bold[0], "Montserrat-Black.ttf");
        assert_eq!(bold[4], "/System/Library/Fonts/Helvetica.ttc");

        let fallback = candidates(false, true);
        assert_eq!(fallback[0], "/System/Library/Fonts/Helvetica.ttc");
        assert!(!fallback.contains(&"Montserrat-Regular.ttf"));
    }

    #[test]
    fn test_matches_candidate() {
        let nested = Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf");
        assert!(matches_candidate(nested, "DejaVuSans-Bold.ttf"));
        assert!(!matches_candidate(nested, "DejaVuSans.ttf"));

        let helvetica = Path::new("/System/Library/Fonts/Helvetica.ttc");
        assert!(matches_candidate(helvetica, "/System/Library/Fonts/Helvetica.ttc"));
        assert!(!matches_candidate(nested, "/System/Library/Fonts/Helvetica.ttc"));
    }

    #[test]
    fn test_database_skips_system_fonts_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a font").unwrap();
        let config = GeneratorConfig {
            assets_dir: dir.path().join("missing"),
            font_dirs: vec![dir.path().to_path_buf()],
            fallback_only: false,
            system_fonts: false,
        };
        assert_eq!(font_database(&config).len(), 0);
    }
}
