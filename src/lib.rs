//! # Brandkit - Branded Marketing Image Generator
//!
//! Brandkit renders on-brand marketing images from a handful of fixed
//! recipes. It provides:
//!
//! - **Blueprint backgrounds**: a deterministic grid/circuit pattern
//! - **Text fitting**: font fallback chains, measurement and word wrapping
//! - **Composition**: anchored logo placement, outlined text, bands, watermarks
//! - **Recipes**: email headers, course covers, social posts, profile pictures
//! - **Batch runs**: JSON manifests rendered in parallel
//!
//! ## Quick Start
//!
//! ```no_run
//! use brandkit::{
//!     config::GeneratorConfig,
//!     recipes::{BrandImageGenerator, CoverLayout, CoverRequest},
//! };
//!
//! // Load logos from ./assets and resolve fonts
//! let generator = BrandImageGenerator::new(&GeneratorConfig::default());
//!
//! let request = CoverRequest {
//!     title: "AI Operations Fundamentals".into(),
//!     subtitle: Some("From Setup to Scale".into()),
//!     key_points: vec!["Practical Implementation".into(), "Measurable ROI".into()],
//!     layout: CoverLayout::CornerLogo,
//!     ..Default::default()
//! };
//!
//! generator.generate_cover(&request, "cover.png")?;
//!
//! # Ok::<(), brandkit::error::BrandError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`recipes`] | Product recipes and the shared generator |
//! | [`layout`] | Size presets, composition plans, text stacking |
//! | [`render`] | Background, compositing and file output |
//! | [`text`] | Fonts, measurement, wrapping |
//! | [`assets`] | Logo variants |
//! | [`palette`] | Brand colours |
//! | [`manifest`] | Batch jobs |
//! | [`config`] | Generator settings |
//! | [`error`] | Error types |
//!
//! ## Degradation
//!
//! Nothing about a missing asset is fatal. A logo that isn't on disk is
//! simply not drawn, a font that can't be found falls through to the
//! next candidate and finally to a built-in bitmap face, and unknown
//! preset, layout, platform or style names resolve to defaults. Only
//! writing the output file can fail.

pub mod assets;
pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod palette;
pub mod recipes;
pub mod render;
pub mod text;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use error::BrandError;
pub use palette::Palette;
pub use recipes::BrandImageGenerator;
