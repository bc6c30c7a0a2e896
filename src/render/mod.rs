//! # Rendering Module
//!
//! Raster building blocks shared by every recipe.
//!
//! ## Modules
//!
//! - [`background`]: procedural blueprint backdrop
//! - [`compose`]: logo placement, outlined text, bands and watermarks
//! - [`output`]: PNG/JPEG encoding
//!
//! ## Usage Example
//!
//! ```
//! use brandkit::render::background::{generate_background, Params};
//!
//! let canvas = generate_background(1200, 600, &Params::default());
//! assert_eq!(canvas.dimensions(), (1200, 600));
//! ```

pub mod background;
pub mod compose;
pub mod output;

/// The pixel buffer a single generation works on.
pub type Canvas = image::RgbaImage;
