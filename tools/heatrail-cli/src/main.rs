//! Heatrail CLI — Command-line interface for cursor tracking and heatmap
//! rendering.
//!
//! Usage:
//!   heatrail track <FRAMES_DIR>    Run a detection pass over a video
//!   heatrail render <FRAMES_DIR>   Composite a heatmap onto a frame
//!   heatrail info <TRAIL>          Show trail document information
//!   heatrail synth <DIR>           Write a synthetic test clip

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "heatrail",
    about = "Cursor motion heatmaps from frame-difference tracking",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a detection pass over a frame sequence and export the trail
    Track {
        /// Directory of numbered frame images
        frames_dir: PathBuf,

        /// Frame rate of the sequence
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Pixel-intensity difference threshold
        #[arg(long)]
        threshold: Option<u8>,

        /// Minimum accepted blob area in pixels
        #[arg(long)]
        min_area: Option<u32>,

        /// Maximum accepted blob area in pixels
        #[arg(long)]
        max_area: Option<u32>,

        /// Output trail document path
        #[arg(short, long, default_value = "trail.json")]
        output: PathBuf,
    },

    /// Build a windowed heatmap and composite it onto a frame
    Render {
        /// Directory of numbered frame images
        frames_dir: PathBuf,

        /// Trail document produced by `track`
        #[arg(long, default_value = "trail.json")]
        trail: PathBuf,

        /// Time of the frame to composite onto (seconds)
        #[arg(long, default_value = "0")]
        at: f64,

        /// Window start in seconds (defaults to the document's window)
        #[arg(long)]
        start: Option<f64>,

        /// Window end in seconds (defaults to the document's window)
        #[arg(long)]
        end: Option<f64>,

        /// Splat diameter basis
        #[arg(long)]
        resolution: Option<u32>,

        /// Gaussian blur kernel size (odd)
        #[arg(long)]
        blur: Option<u32>,

        /// Peak overlay opacity in (0, 1]
        #[arg(long)]
        alpha: Option<f32>,

        /// Colormap: hot|jet|inferno|plasma|viridis
        #[arg(long)]
        colormap: Option<String>,

        /// Output image path
        #[arg(short, long, default_value = "heatmap.png")]
        output: PathBuf,
    },

    /// Show trail document information
    Info {
        /// Path to the trail document
        trail: PathBuf,

        /// Dump the raw document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic moving-disk clip as a frame sequence
    Synth {
        /// Output directory for the frames
        dir: PathBuf,

        /// Frame width
        #[arg(long, default_value = "100")]
        width: u32,

        /// Frame height
        #[arg(long, default_value = "100")]
        height: u32,

        /// Frame rate
        #[arg(long, default_value = "10")]
        fps: f64,

        /// Clip duration in seconds
        #[arg(long, default_value = "10")]
        duration: f64,

        /// Disk radius in pixels
        #[arg(long, default_value = "4")]
        radius: i32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    heatrail_common::logging::init_logging(&heatrail_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Track {
            frames_dir,
            fps,
            threshold,
            min_area,
            max_area,
            output,
        } => commands::track::run(frames_dir, fps, threshold, min_area, max_area, output).await,
        Commands::Render {
            frames_dir,
            trail,
            at,
            start,
            end,
            resolution,
            blur,
            alpha,
            colormap,
            output,
        } => commands::render::run(
            frames_dir, trail, at, start, end, resolution, blur, alpha, colormap, output,
        ),
        Commands::Info { trail, json } => commands::info::run(trail, json),
        Commands::Synth {
            dir,
            width,
            height,
            fps,
            duration,
            radius,
        } => commands::synth::run(dir, width, height, fps, duration, radius),
    }
}
