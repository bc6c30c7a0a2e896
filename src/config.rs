//! # Generator Configuration
//!
//! Where assets and fonts come from. Every field has a default, so a
//! manifest may carry a partial `config` block:
//!
//! ```
//! use brandkit::config::GeneratorConfig;
//!
//! let config: GeneratorConfig = serde_json::from_str(r#"{"assets_dir": "brand"}"#).unwrap();
//! assert_eq!(config.assets_dir.to_str(), Some("brand"));
//! assert!(!config.fallback_only);
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read once when a generator is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the logo bitmaps (and optionally a `fonts/` dir).
    pub assets_dir: PathBuf,
    /// Extra font directories, searched first.
    pub font_dirs: Vec<PathBuf>,
    /// Skip the preferred brand families and go straight to platform fonts.
    pub fallback_only: bool,
    /// Also load the fonts installed on the system.
    pub system_fonts: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            font_dirs: Vec::new(),
            fallback_only: false,
            system_fonts: true,
        }
    }
}

impl GeneratorConfig {
    /// Config rooted at an assets directory, other fields default.
    pub fn with_assets(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            ..Default::default()
        }
    }

    /// Font directories loaded ahead of the system fonts, in order.
    pub fn font_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.font_dirs.clone();
        dirs.push(self.assets_dir.join("fonts"));
        dirs
    }
}
