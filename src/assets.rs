//! # Logo Assets
//!
//! The brand ships up to four logo bitmaps. Each one is optional: a
//! directory with only the icon is a perfectly valid asset store, and
//! consumers branch on [`LogoStore::get`] returning `None`.
//!
//! ## Usage
//!
//! ```no_run
//! use brandkit::assets::{LogoStore, LogoVariant};
//!
//! let logos = LogoStore::load("assets");
//! if let Some(icon) = logos.get(LogoVariant::IconNoBg) {
//!     println!("icon is {}x{}", icon.width(), icon.height());
//! }
//! ```

use image::RgbaImage;
use std::path::Path;
use tracing::{debug, info, warn};

/// Symbolic logo variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoVariant {
    /// Icon on a transparent background
    IconNoBg,
    /// Icon with its own background
    IconBg,
    /// Full lockup with title and subtitle
    Full,
    /// Wide banner with subtitle
    Banner,
}

impl LogoVariant {
    /// All variants, in load order.
    pub const ALL: [LogoVariant; 4] = [
        LogoVariant::IconNoBg,
        LogoVariant::IconBg,
        LogoVariant::Full,
        LogoVariant::Banner,
    ];

    /// Short key (e.g. `"icon_nobg"`).
    pub fn key(self) -> &'static str {
        match self {
            LogoVariant::IconNoBg => "icon_nobg",
            LogoVariant::IconBg => "icon_bg",
            LogoVariant::Full => "full",
            LogoVariant::Banner => "banner",
        }
    }

    /// File name inside the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            LogoVariant::IconNoBg => "logo icon no bg.png",
            LogoVariant::IconBg => "logo icon.png",
            LogoVariant::Full => "med logo title subtitle w_bg.png",
            LogoVariant::Banner => "banner with subtitle.png",
        }
    }

    /// Look up a variant by key.
    pub fn by_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Decoded logo images, one optional slot per variant.
///
/// Loaded once and never mutated afterwards, so a store can be shared
/// read-only between concurrent generations.
#[derive(Debug, Clone, Default)]
pub struct LogoStore {
    slots: [Option<RgbaImage>; 4],
}

impl LogoStore {
    /// An empty store (every placement becomes a no-op).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every variant present in `dir`.
    ///
    /// Missing files are skipped silently; files that exist but fail to
    /// decode are logged and skipped.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut store = Self::empty();

        for variant in LogoVariant::ALL {
            let path = dir.join(variant.file_name());
            if !path.exists() {
                debug!(variant = variant.key(), path = %path.display(), "logo not present");
                continue;
            }

            match image::open(&path) {
                Ok(img) => {
                    info!(variant = variant.key(), "loaded {}", variant.file_name());
                    store.slots[variant.index()] = Some(img.to_rgba8());
                }
                Err(e) => {
                    warn!(
                        variant = variant.key(),
                        path = %path.display(),
                        "could not decode logo: {}",
                        e
                    );
                }
            }
        }

        store
    }

    /// Builder-style insert, mostly useful for in-memory assets.
    pub fn with_logo(mut self, variant: LogoVariant, image: RgbaImage) -> Self {
        self.slots[variant.index()] = Some(image);
        self
    }

    /// The image for `variant`, if it was loaded.
    pub fn get(&self, variant: LogoVariant) -> Option<&RgbaImage> {
        self.slots[variant.index()].as_ref()
    }

    /// Whether `variant` is available.
    pub fn has(&self, variant: LogoVariant) -> bool {
        self.get(variant).is_some()
    }

    /// Keys of the loaded variants.
    pub fn loaded_keys(&self) -> Vec<&'static str> {
        LogoVariant::ALL
            .into_iter()
            .filter(|v| self.has(*v))
            .map(|v| v.key())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_keys_round_trip() {
        for variant in LogoVariant::ALL {
            assert_eq!(LogoVariant::by_key(variant.key()), Some(variant));
        }
        assert_eq!(LogoVariant::by_key("wordmark"), None);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let store = LogoStore::load("/definitely/not/a/real/assets/dir");
        assert!(store.loaded_keys().is_empty());
        assert!(store.get(LogoVariant::IconNoBg).is_none());
    }

    #[test]
    fn test_load_partial_directory() {
        let dir = tempfile::tempdir().unwrap();
        let icon = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        icon.save(dir.path().join("logo icon no bg.png")).unwrap();
        std::fs::write(dir.path().join("logo icon.png"), b"not a png").unwrap();

        let store = LogoStore::load(dir.path());
        assert_eq!(store.loaded_keys(), vec!["icon_nobg"]);
        assert_eq!(store.get(LogoVariant::IconNoBg).unwrap().dimensions(), (8, 8));
        assert!(!store.has(LogoVariant::IconBg));
    }

    #[test]
    fn test_with_logo() {
        let store = LogoStore::empty().with_logo(LogoVariant::Banner, RgbaImage::new(4, 2));
        assert!(store.has(LogoVariant::Banner));
        assert!(!store.has(LogoVariant::Full));
    }
}
