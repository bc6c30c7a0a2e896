//! # Brandkit CLI
//!
//! Command-line interface for generating branded marketing images.
//!
//! ## Usage
//!
//! ```bash
//! # Email header
//! brandkit header "AI in Manufacturing" --subtitle "This Week's Insights" -o header.png
//!
//! # Course cover with key points
//! brandkit cover "AI Operations" --point "Case Studies" --point "ROI" --layout split -o cover.png
//!
//! # Social post (second line of the message is the subtitle/context)
//! brandkit social $'78%\nof businesses struggle' --style stat --platform instagram -o stat.jpg
//!
//! # Profile picture
//! brandkit profile --platform twitter -o avatar.png
//!
//! # Bare background
//! brandkit background 1920 1080 --grid 60 -o bg.png
//!
//! # Render a whole manifest
//! brandkit batch demos/showcase.json --out-dir out
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use brandkit::{
    BrandError, BrandImageGenerator, GeneratorConfig,
    layout::{CoverSize, HeaderSize},
    manifest::{self, BackgroundRequest, Manifest},
    recipes::{
        CoverLayout, CoverRequest, HeaderLayout, HeaderRequest, ProfileRequest, SocialPostRequest,
        SocialStyle,
    },
    render::output,
    text::FontBook,
};

/// Brandkit - Branded marketing image generator
#[derive(Parser, Debug)]
#[command(name = "brandkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Directory holding the logo files
    #[arg(long, global = true, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Extra font directory, searched first (repeatable)
    #[arg(long = "font-dir", global = true, value_name = "DIR")]
    font_dirs: Vec<PathBuf>,

    /// Skip the preferred brand fonts and use platform defaults
    #[arg(long, global = true)]
    fallback_fonts: bool,

    /// Use only the built-in bitmap font
    #[arg(long, global = true)]
    builtin_font: bool,

    /// Log font resolution and layout decisions
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an email newsletter header
    Header {
        title: String,

        #[arg(long)]
        subtitle: Option<String>,

        /// centered, left or minimal
        #[arg(long, default_value = "centered")]
        layout: String,

        /// large (1200x600) or medium (600x400)
        #[arg(long, default_value = "large")]
        size: String,

        #[arg(short, long, default_value = "header.png")]
        output: PathBuf,
    },

    /// Generate a course cover
    Cover {
        title: String,

        #[arg(long)]
        subtitle: Option<String>,

        /// Key point (repeatable, at most 4 are shown)
        #[arg(long = "point", value_name = "TEXT")]
        points: Vec<String>,

        /// corner-logo, split, overlay or banner
        #[arg(long, default_value = "corner-logo")]
        layout: String,

        /// hd (1280x720) or fhd (1920x1080)
        #[arg(long, default_value = "hd")]
        size: String,

        #[arg(short, long, default_value = "cover.png")]
        output: PathBuf,
    },

    /// Generate a social media post
    Social {
        message: String,

        #[arg(long, default_value = "instagram")]
        platform: String,

        /// quote, announcement, tip or stat
        #[arg(long, default_value = "quote")]
        style: String,

        /// Platform slot, e.g. square, post, portrait
        #[arg(long, default_value = "square")]
        size: String,

        /// Leave the logo off
        #[arg(long)]
        no_logo: bool,

        #[arg(short, long, default_value = "social.png")]
        output: PathBuf,
    },

    /// Generate a profile picture
    Profile {
        #[arg(long, default_value = "instagram")]
        platform: String,

        #[arg(short, long, default_value = "profile.png")]
        output: PathBuf,
    },

    /// Write only the blueprint background
    Background {
        width: u32,
        height: u32,

        /// Grid spacing in pixels
        #[arg(long, default_value = "40")]
        grid: u32,

        /// Pattern alpha, 0-255
        #[arg(long, default_value = "50")]
        opacity: u8,

        #[arg(short, long, default_value = "background.png")]
        output: PathBuf,
    },

    /// Render every job in a JSON manifest
    Batch {
        manifest: PathBuf,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// List presets, layouts and platforms
    List,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "brandkit=debug" } else { "brandkit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

impl GlobalArgs {
    fn config(&self) -> GeneratorConfig {
        let mut config = match &self.assets {
            Some(dir) => GeneratorConfig::with_assets(dir),
            None => GeneratorConfig::default(),
        };
        config.font_dirs = self.font_dirs.clone();
        config.fallback_only = self.fallback_fonts;
        config
    }

    fn generator(&self) -> BrandImageGenerator {
        let config = self.config();
        let generator = BrandImageGenerator::new(&config);
        if self.builtin_font {
            BrandImageGenerator::from_parts(generator.logos, FontBook::builtin())
        } else {
            generator
        }
    }
}

fn run(cli: Cli) -> Result<(), BrandError> {
    match cli.command {
        Commands::Header {
            title,
            subtitle,
            layout,
            size,
            output,
        } => {
            let request = HeaderRequest {
                title,
                subtitle,
                layout: HeaderLayout::from_name(&layout),
                size: HeaderSize::from_name(&size),
            };
            cli.global.generator().generate_header(&request, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Cover {
            title,
            subtitle,
            points,
            layout,
            size,
            output,
        } => {
            let request = CoverRequest {
                title,
                subtitle,
                key_points: points,
                layout: CoverLayout::from_name(&layout),
                size: CoverSize::from_name(&size),
            };
            cli.global.generator().generate_cover(&request, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Social {
            message,
            platform,
            style,
            size,
            no_logo,
            output,
        } => {
            let request = SocialPostRequest {
                message,
                platform,
                style: SocialStyle::from_name(&style),
                size,
                include_logo: !no_logo,
            };
            cli.global.generator().generate_social(&request, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Profile { platform, output } => {
            cli.global.generator().generate_profile(&ProfileRequest { platform }, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Background {
            width,
            height,
            grid,
            opacity,
            output,
        } => {
            let request = BackgroundRequest {
                width,
                height,
                grid_size: grid,
                opacity,
            };
            request.validate()?;
            let generator = BrandImageGenerator::builtin();
            let canvas = generator.background(width, height, &request.params());
            output::save(&canvas, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Batch { manifest: path, out_dir } => {
            let mut loaded = Manifest::load(&path)?;
            if let Some(assets) = &cli.global.assets {
                loaded.config.assets_dir = assets.clone();
            }
            loaded.config.font_dirs.extend(cli.global.font_dirs.iter().cloned());
            loaded.config.fallback_only |= cli.global.fallback_fonts;

            std::fs::create_dir_all(&out_dir)?;
            let mut generator = BrandImageGenerator::new(&loaded.config);
            if cli.global.builtin_font {
                generator.fonts = FontBook::builtin();
            }

            let reports = manifest::run_batch(&generator, &loaded.jobs, &out_dir);
            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            for report in &reports {
                match &report.result {
                    Ok(()) => println!("  ok    {:<10} {}", report.kind, report.output.display()),
                    Err(e) => println!(
                        "  FAIL  {:<10} {}: {}",
                        report.kind,
                        report.output.display(),
                        e
                    ),
                }
            }
            println!("\n{} of {} jobs succeeded", reports.len() - failed, reports.len());

            if failed > 0 {
                return Err(BrandError::InvalidRequest(format!("{} job(s) failed", failed)));
            }
        }

        Commands::List => {
            println!("Header layouts: centered, left, minimal");
            println!("Header sizes:");
            for preset in [HeaderSize::LARGE, HeaderSize::MEDIUM] {
                println!("  {:<10} {}x{}", preset.name, preset.width, preset.height);
            }
            println!("\nCover layouts: corner-logo, split, overlay, banner");
            println!("Cover sizes:");
            for preset in [CoverSize::HD, CoverSize::FHD] {
                println!("  {:<10} {}x{}", preset.name, preset.width, preset.height);
            }
            println!("\nSocial styles: quote, announcement, tip, stat");
            println!("Platforms:");
            for platform in brandkit::layout::presets::PLATFORMS {
                let slots: Vec<String> = platform
                    .slots
                    .iter()
                    .map(|s| format!("{} {}x{}", s.name, s.width, s.height))
                    .collect();
                println!("  {:<10} {}", platform.name, slots.join(", "));
            }
        }
    }

    Ok(())
}
