mod terminal;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use letter_render::{
    AlphaMode, OverlapPolicy, Pipeline, PipelineConfig, RunOutcome, SampleOptions, UserFile,
};
use log::info;
use walkdir::WalkDir;

use crate::terminal::TerminalSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render images as grids of colored letters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the image a route such as "#3" selects
    Show(ShowArgs),
    /// Show an image file picked by the user
    Open(OpenArgs),
    /// Step through every numbered image in the images directory
    Slideshow(SlideshowArgs),
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Routing signal carrying the image number, e.g. "#3"
    route: Option<String>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct OpenArgs {
    /// Image file to display
    input: Option<PathBuf>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct SlideshowArgs {
    /// Time each image stays on screen
    #[arg(long, default_value_t = 3000)]
    interval_ms: u64,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Directory holding image-<n>.<ext> files
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,
    /// Extension of the numbered images
    #[arg(long, default_value = "jpg")]
    ext: String,
    /// Width of the sampling surface in pixels
    #[arg(long, default_value_t = 800)]
    surface_width: u32,
    /// Height of the sampling surface in pixels
    #[arg(long, default_value_t = 600)]
    surface_height: u32,
    /// Fade duration in milliseconds
    #[arg(long, default_value_t = 1200)]
    fade_ms: u64,
    /// White letters with brightness-derived opacity
    #[arg(long, default_value_t = false)]
    monochrome: bool,
    /// Source of each letter's opacity
    #[arg(long, value_enum)]
    alpha: Option<AlphaChoice>,
    /// Complement the letter opacity (requires a normalized alpha source)
    #[arg(long, default_value_t = false)]
    invert: bool,
    /// Let a newer run overlap an unfinished one instead of replacing it
    #[arg(long, default_value_t = false)]
    allow_overlap: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlphaChoice {
    Raw,
    Normalized,
    Darkness,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Show(args) => show(args).await,
        Commands::Open(args) => open(args).await,
        Commands::Slideshow(args) => slideshow(args).await,
    }
}

fn pipeline(settings: &RenderSettings) -> Result<Pipeline<TerminalSink<std::io::Stdout>>> {
    Pipeline::new(settings.to_config(), TerminalSink::stdout()).context("invalid render settings")
}

async fn show(args: ShowArgs) -> Result<()> {
    let pipeline = pipeline(&args.settings)?;
    let outcome = pipeline.on_route_change(args.route.as_deref()).await;
    check(outcome)
}

async fn open(args: OpenArgs) -> Result<()> {
    let pipeline = pipeline(&args.settings)?;
    let outcome = pipeline.on_file_selected(args.input.map(UserFile::Path)).await;
    check(outcome)
}

async fn slideshow(args: SlideshowArgs) -> Result<()> {
    let pipeline = pipeline(&args.settings)?;
    let config = pipeline.config();
    let selectors = discover_selectors(&config.images_dir, &config.extension);
    if selectors.is_empty() {
        anyhow::bail!("no image-<n>.{} files found in {:?}", config.extension, config.images_dir);
    }

    for selector in selectors {
        let outcome = pipeline.on_route_change(Some(&format!("#{selector}"))).await;
        info!("image {selector}: {outcome:?}");
        tokio::time::sleep(Duration::from_millis(args.interval_ms)).await;
    }

    Ok(())
}

fn check(outcome: RunOutcome) -> Result<()> {
    match outcome {
        RunOutcome::Failed => anyhow::bail!("the image could not be displayed"),
        RunOutcome::Presented | RunOutcome::Abandoned => Ok(()),
    }
}

/// Numbers of the `image-<n>.<ext>` files directly inside `dir`, ascending.
fn discover_selectors(dir: &Path, ext: &str) -> Vec<u32> {
    let mut selectors: Vec<u32> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| selector_from_name(entry.file_name().to_str()?, ext))
        .collect();
    selectors.sort_unstable();
    selectors.dedup();
    selectors
}

fn selector_from_name(name: &str, ext: &str) -> Option<u32> {
    let stem = name.strip_prefix("image-")?.strip_suffix(ext)?.strip_suffix('.')?;
    stem.parse().ok().filter(|n| *n > 0)
}

impl RenderSettings {
    fn to_config(&self) -> PipelineConfig {
        let mut sample =
            if self.monochrome { SampleOptions::monochrome() } else { SampleOptions::default() };
        if let Some(alpha) = self.alpha {
            sample.alpha_mode = alpha.to_mode();
        }
        sample.invert = self.invert;

        PipelineConfig {
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            fade: Duration::from_millis(self.fade_ms),
            images_dir: self.images_dir.clone(),
            extension: self.ext.clone(),
            sample,
            overlap: if self.allow_overlap {
                OverlapPolicy::Concurrent
            } else {
                OverlapPolicy::Supersede
            },
            text: None,
        }
    }
}

impl AlphaChoice {
    fn to_mode(self) -> AlphaMode {
        match self {
            AlphaChoice::Raw => AlphaMode::Raw,
            AlphaChoice::Normalized => AlphaMode::Normalized,
            AlphaChoice::Darkness => AlphaMode::Darkness,
        }
    }
}
