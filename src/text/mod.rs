//! # Text Fitting
//!
//! Font selection, measurement and word wrapping.
//!
//! ## Modules
//!
//! - [`font`]: [`BrandFont`] handles and the [`FontBook`] resolution chain
//! - [`wrap`]: greedy pixel-width word wrapping
//! - `builtin`: the Spleen bitmap face used when no outline font exists
//!
//! ## Example
//!
//! ```
//! use brandkit::text::{wrap, FontBook};
//!
//! let fonts = FontBook::builtin();
//! let font = fonts.font(20, true);
//! let lines = wrap("hello world foo", &font, 110);
//! assert_eq!(lines, vec!["hello world", "foo"]);
//! ```

mod builtin;
pub mod font;
pub mod wrap;

pub use font::{BrandFont, FontBook};
pub use wrap::{TextMeasure, wrap};

/// Pixel bounding box of `text` rendered with `font`.
pub fn measure(text: &str, font: &BrandFont) -> (u32, u32) {
    font.measure(text)
}
