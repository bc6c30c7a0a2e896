//! # Error Types
//!
//! This module defines error types used throughout the brandkit library.
//!
//! Most of the generator is infallible by construction: missing logos,
//! missing fonts and unknown preset names all degrade to defaults. Only
//! writing the final raster and reading a manifest can fail.

use thiserror::Error;

/// Main error type for brandkit operations
#[derive(Debug, Error)]
pub enum BrandError {
    /// I/O error wrapper (reading manifests, creating output files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed batch manifest
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Request that cannot be rendered at all
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BrandError>;
