//! # Brand Palette
//!
//! Fixed colour table shared by every recipe. Colours are plain
//! [`image::Rgba`] values so they can be written straight into a canvas.
//!
//! | Name | Hex |
//! |------|-----|
//! | `brand_orange` | `#FF8C00` |
//! | `brand_blue` | `#1E5A8E` |
//! | `dark_blue` | `#0D2C4A` |
//! | `blueprint_blue` | `#2A5F8E` |
//! | `white` | `#FFFFFF` |
//! | `black` | `#1A1A1A` |
//! | `pattern_blue` | `#3469A2` |

use image::Rgba;

/// RGBA colour, 8 bits per channel.
pub type Color = Rgba<u8>;

/// Opaque colour from RGB components.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgba([r, g, b, 255])
}

/// Same colour with a different alpha.
pub const fn with_alpha(color: Color, alpha: u8) -> Color {
    Rgba([color.0[0], color.0[1], color.0[2], alpha])
}

/// Semantic colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub brand_orange: Color,
    pub brand_blue: Color,
    pub dark_blue: Color,
    pub blueprint_blue: Color,
    pub white: Color,
    pub black: Color,
    /// Line colour of the blueprint overlay.
    pub pattern_blue: Color,
}

impl Palette {
    /// The brand palette.
    pub const BRAND: Self = Self {
        brand_orange: rgb(255, 140, 0),
        brand_blue: rgb(30, 90, 142),
        dark_blue: rgb(13, 44, 74),
        blueprint_blue: rgb(42, 95, 142),
        white: rgb(255, 255, 255),
        black: rgb(26, 26, 26),
        pattern_blue: rgb(52, 105, 162),
    };

    /// All semantic names, in table order.
    pub const NAMES: &'static [&'static str] = &[
        "brand_orange",
        "brand_blue",
        "dark_blue",
        "blueprint_blue",
        "white",
        "black",
        "pattern_blue",
    ];

    /// Look up a colour by its semantic name.
    pub fn by_name(&self, name: &str) -> Option<Color> {
        match name {
            "brand_orange" => Some(self.brand_orange),
            "brand_blue" => Some(self.brand_blue),
            "dark_blue" => Some(self.dark_blue),
            "blueprint_blue" => Some(self.blueprint_blue),
            "white" => Some(self.white),
            "black" => Some(self.black),
            "pattern_blue" => Some(self.pattern_blue),
            _ => None,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::BRAND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_values() {
        let p = Palette::BRAND;
        assert_eq!(p.brand_orange, Rgba([255, 140, 0, 255]));
        assert_eq!(p.brand_blue, Rgba([30, 90, 142, 255]));
        assert_eq!(p.black, Rgba([26, 26, 26, 255]));
    }

    #[test]
    fn test_every_name_resolves() {
        let p = Palette::default();
        for name in Palette::NAMES {
            assert!(p.by_name(name).is_some(), "missing {}", name);
        }
        assert!(p.by_name("magenta").is_none());
    }

    #[test]
    fn test_with_alpha() {
        let c = with_alpha(Palette::BRAND.dark_blue, 220);
        assert_eq!(c, Rgba([13, 44, 74, 220]));
    }
}
