//! # Size Presets
//!
//! Named output sizes for every product.
//!
//! | Product | Presets | Fallback |
//! |---------|---------|----------|
//! | Email header | `large` 1200×600, `medium` 600×400 | `large` |
//! | Course cover | `hd` 1280×720, `fhd` 1920×1080 | `hd` |
//! | Social | platform → slot table below | `instagram`, first slot |
//!
//! Unknown names never fail; they resolve to the fallback and log at
//! debug level.

use serde::Deserialize;
use tracing::debug;

/// A named `(width, height)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl SizePreset {
    pub const fn new(name: &'static str, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Email header sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HeaderSize {
    #[default]
    Large,
    Medium,
}

impl HeaderSize {
    pub const LARGE: SizePreset = SizePreset::new("large", 1200, 600);
    pub const MEDIUM: SizePreset = SizePreset::new("medium", 600, 400);

    /// Parse a preset name; anything unknown is `large`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "large" => HeaderSize::Large,
            "medium" => HeaderSize::Medium,
            other => {
                debug!(size = other, "unknown header size, using large");
                HeaderSize::Large
            }
        }
    }

    pub fn preset(self) -> SizePreset {
        match self {
            HeaderSize::Large => Self::LARGE,
            HeaderSize::Medium => Self::MEDIUM,
        }
    }
}

impl From<String> for HeaderSize {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Course cover sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CoverSize {
    #[default]
    Hd,
    Fhd,
}

impl CoverSize {
    pub const HD: SizePreset = SizePreset::new("hd", 1280, 720);
    pub const FHD: SizePreset = SizePreset::new("fhd", 1920, 1080);

    /// Parse a preset name; anything unknown is `hd`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "hd" => CoverSize::Hd,
            "fhd" => CoverSize::Fhd,
            other => {
                debug!(size = other, "unknown cover size, using hd");
                CoverSize::Hd
            }
        }
    }

    pub fn preset(self) -> SizePreset {
        match self {
            CoverSize::Hd => Self::HD,
            CoverSize::Fhd => Self::FHD,
        }
    }
}

impl From<String> for CoverSize {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// A social platform and its image slots, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub name: &'static str,
    pub slots: &'static [SizePreset],
}

impl Platform {
    /// Look up a slot; unknown slots resolve to the first declared one.
    pub fn slot(&self, name: &str) -> SizePreset {
        match self.slots.iter().find(|s| s.name == name) {
            Some(slot) => *slot,
            None => {
                let first = self.slots[0];
                debug!(platform = self.name, slot = name, fallback = first.name, "unknown slot");
                first
            }
        }
    }

    /// The profile-picture slot (always declared first).
    pub fn profile(&self) -> SizePreset {
        self.slot("profile")
    }
}

/// Platform used when the requested one is unknown.
pub const DEFAULT_PLATFORM: &str = "instagram";

/// Every supported platform.
pub const PLATFORMS: &[Platform] = &[
    Platform {
        name: "twitter",
        slots: &[
            SizePreset::new("profile", 400, 400),
            SizePreset::new("header", 1500, 500),
            SizePreset::new("post", 1200, 675),
        ],
    },
    Platform {
        name: "linkedin",
        slots: &[
            SizePreset::new("profile", 400, 400),
            SizePreset::new("banner", 1584, 396),
            SizePreset::new("post", 1200, 627),
        ],
    },
    Platform {
        name: "facebook",
        slots: &[
            SizePreset::new("profile", 180, 180),
            SizePreset::new("cover", 820, 312),
            SizePreset::new("post", 1200, 630),
        ],
    },
    Platform {
        name: "instagram",
        slots: &[
            SizePreset::new("profile", 320, 320),
            SizePreset::new("square", 1080, 1080),
            SizePreset::new("portrait", 1080, 1350),
            SizePreset::new("landscape", 1080, 566),
        ],
    },
];

/// Find a platform by name (case-insensitive), falling back to Instagram.
pub fn platform(name: &str) -> &'static Platform {
    let lower = name.to_ascii_lowercase();
    if let Some(p) = PLATFORMS.iter().find(|p| p.name == lower) {
        return p;
    }
    debug!(platform = name, "unknown platform, using {}", DEFAULT_PLATFORM);
    // The default is a member of the table
    PLATFORMS
        .iter()
        .find(|p| p.name == DEFAULT_PLATFORM)
        .unwrap_or(&PLATFORMS[0])
}

/// Two-level lookup: platform, then slot.
pub fn platform_size(platform_name: &str, slot: &str) -> SizePreset {
    platform(platform_name).slot(slot)
}

/// Names of every platform.
pub fn platform_names() -> Vec<&'static str> {
    PLATFORMS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_sizes() {
        assert_eq!(HeaderSize::from_name("medium").preset().dimensions(), (600, 400));
        assert_eq!(HeaderSize::from_name("LARGE").preset().dimensions(), (1200, 600));
        assert_eq!(HeaderSize::from_name("xl").preset().dimensions(), (1200, 600));
    }

    #[test]
    fn test_cover_sizes() {
        assert_eq!(CoverSize::from_name("fhd").preset().dimensions(), (1920, 1080));
        assert_eq!(CoverSize::from_name("4k").preset().dimensions(), (1280, 720));
    }

    #[test]
    fn test_platform_lookup() {
        assert_eq!(platform_size("twitter", "header").dimensions(), (1500, 500));
        assert_eq!(platform_size("LinkedIn", "banner").dimensions(), (1584, 396));
        assert_eq!(platform_size("facebook", "cover").dimensions(), (820, 312));
        assert_eq!(platform_size("instagram", "portrait").dimensions(), (1080, 1350));
    }

    #[test]
    fn test_unknown_platform_is_instagram() {
        assert_eq!(platform("myspace").name, "instagram");
        assert_eq!(platform_size("myspace", "square").dimensions(), (1080, 1080));
    }

    #[test]
    fn test_unknown_slot_is_first() {
        assert_eq!(platform_size("twitter", "story").name, "profile");
        assert_eq!(platform_size("instagram", "post").dimensions(), (320, 320));
    }

    #[test]
    fn test_profile_sizes() {
        let sizes: Vec<_> = PLATFORMS.iter().map(|p| p.profile().width).collect();
        assert_eq!(sizes, vec![400, 400, 180, 320]);
    }

    #[test]
    fn test_lenient_deserialize() {
        let size: HeaderSize = serde_json::from_str("\"huge\"").unwrap();
        assert_eq!(size, HeaderSize::Large);
        let size: CoverSize = serde_json::from_str("\"fhd\"").unwrap();
        assert_eq!(size, CoverSize::Fhd);
    }
}
