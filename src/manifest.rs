//! # Batch Manifests
//!
//! Render many images from one JSON file. Every job is independent: they
//! run in parallel against one shared generator and a failing job is
//! reported without affecting the rest.
//!
//! ```
//! use brandkit::manifest::{JobRequest, Manifest};
//!
//! let manifest: Manifest = serde_json::from_str(r#"{
//!     "config": {"assets_dir": "brand"},
//!     "jobs": [
//!         {"kind": "header", "output": "header.png", "title": "Weekly", "layout": "minimal"},
//!         {"kind": "social", "output": "quote.jpg", "message": "Keep it boring",
//!          "platform": "twitter", "size": "post"},
//!         {"kind": "profile", "output": "avatar.png"}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(manifest.jobs.len(), 3);
//! assert!(matches!(manifest.jobs[2].request, JobRequest::Profile(_)));
//! ```

use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::GeneratorConfig;
use crate::error::{BrandError, Result};
use crate::recipes::{
    BrandImageGenerator, CoverRequest, HeaderRequest, ProfileRequest, SocialPostRequest,
};
use crate::render::background::Params;
use crate::render::{Canvas, output};

/// A batch of jobs plus the generator settings they share.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub config: GeneratorConfig,
    pub jobs: Vec<Job>,
}

/// One output file.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Destination, relative to the batch output directory
    pub output: PathBuf,
    #[serde(flatten)]
    pub request: JobRequest,
}

/// What to render, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobRequest {
    Header(HeaderRequest),
    Cover(CoverRequest),
    Social(SocialPostRequest),
    Profile(ProfileRequest),
    Background(BackgroundRequest),
}

/// A bare blueprint background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BackgroundRequest {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

fn default_grid_size() -> u32 {
    Params::default().grid_size
}

fn default_opacity() -> u8 {
    Params::default().opacity
}

impl BackgroundRequest {
    pub fn params(&self) -> Params {
        Params {
            grid_size: self.grid_size,
            opacity: self.opacity,
        }
    }

    /// Reject empty canvases.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BrandError::InvalidRequest(format!(
                "background size {}x{} must be positive",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Manifest {
    /// Read a manifest; relative asset and font paths are taken relative
    /// to the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut manifest: Manifest = serde_json::from_str(&std::fs::read_to_string(path)?)?;

        if let Some(base) = path.parent() {
            manifest.config.assets_dir = base.join(&manifest.config.assets_dir);
            for dir in &mut manifest.config.font_dirs {
                *dir = base.join(&*dir);
            }
        }

        Ok(manifest)
    }
}

impl JobRequest {
    /// Short job kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            JobRequest::Header(_) => "header",
            JobRequest::Cover(_) => "cover",
            JobRequest::Social(_) => "social",
            JobRequest::Profile(_) => "profile",
            JobRequest::Background(_) => "background",
        }
    }

    /// Render and save to `path`.
    pub fn run(&self, generator: &BrandImageGenerator, path: &Path) -> Result<Canvas> {
        match self {
            JobRequest::Header(req) => generator.generate_header(req, path),
            JobRequest::Cover(req) => generator.generate_cover(req, path),
            JobRequest::Social(req) => generator.generate_social(req, path),
            JobRequest::Profile(req) => generator.generate_profile(req, path),
            JobRequest::Background(req) => {
                req.validate()?;
                let canvas = generator.background(req.width, req.height, &req.params());
                output::save(&canvas, path)?;
                Ok(canvas)
            }
        }
    }
}

/// Outcome of one job.
#[derive(Debug)]
pub struct JobReport {
    pub output: PathBuf,
    pub kind: &'static str,
    pub result: Result<()>,
}

impl JobReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every job, in parallel, writing under `out_dir`.
///
/// Reports come back in job order.
pub fn run_batch(generator: &BrandImageGenerator, jobs: &[Job], out_dir: &Path) -> Vec<JobReport> {
    jobs.par_iter()
        .map(|job| {
            let output = out_dir.join(&job.output);
            let kind = job.request.kind();
            let result = job.request.run(generator, &output).map(|_| ());

            match &result {
                Ok(()) => info!(kind, output = %output.display(), "job done"),
                Err(e) => error!(kind, output = %output.display(), error = %e, "job failed"),
            }

            JobReport {
                output,
                kind,
                result,
            }
        })
        .collect()
}

/// Load a manifest, build its generator and run every job.
pub fn run_manifest(path: impl AsRef<Path>, out_dir: &Path) -> Result<Vec<JobReport>> {
    let manifest = Manifest::load(path)?;
    std::fs::create_dir_all(out_dir)?;
    let generator = BrandImageGenerator::new(&manifest.config);
    Ok(run_batch(&generator, &manifest.jobs, out_dir))
}
