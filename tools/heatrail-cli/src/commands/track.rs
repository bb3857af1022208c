//! Run a detection pass over a frame sequence.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use heatrail_common::config::AppConfig;
use heatrail_detect::{DetectionPass, PassOutcome};
use heatrail_frame_source::{FrameSource, ImageSequenceSource};
use heatrail_trail_model::{
    DetectionSettings, HeatmapSettings, TimeWindow, TrailDocument, VideoInfo,
};

pub async fn run(
    frames_dir: PathBuf,
    fps: f64,
    threshold: Option<u8>,
    min_area: Option<u32>,
    max_area: Option<u32>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let settings = DetectionSettings {
        threshold: threshold.unwrap_or(config.detection.threshold),
        min_area: min_area.unwrap_or(config.detection.min_area),
        max_area: max_area.unwrap_or(config.detection.max_area),
    }
    .normalized();

    let mut source = ImageSequenceSource::open(&frames_dir, fps)
        .map_err(|e| anyhow::anyhow!("Failed to open frame sequence: {e}"))?;

    let (width, height) = source.dimensions();
    let frame_count = source.frame_count();
    let duration = source.duration_secs();

    println!("Tracking: {}", frames_dir.display());
    println!("  Frames: {frame_count} ({width}x{height} @ {fps} fps, {duration:.1}s)");
    println!(
        "  Detection: threshold={} area=[{}, {}]",
        settings.threshold, settings.min_area, settings.max_area
    );
    println!();
    println!("Press Ctrl+C to cancel...");
    println!();

    let pass = DetectionPass::new(settings);

    // Wire Ctrl+C to the pass's cooperative cancel flag.
    let cancel = pass.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancellation requested");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    // The pass is CPU-bound; keep it off the async runtime's core threads.
    let outcome = tokio::task::spawn_blocking(move || {
        let mut last_decile = 0u32;
        pass.run(&mut source, |progress| {
            let decile = (progress * 10.0) as u32;
            if decile > last_decile {
                last_decile = decile;
                tracing::info!(percent = decile * 10, "Detection progress");
            }
        })
    })
    .await??;

    let trail = match outcome {
        PassOutcome::Completed(trail) => trail,
        PassOutcome::Cancelled => {
            println!("Pass cancelled; no trail written.");
            return Ok(());
        }
    };

    println!(
        "Detected {} positions across {} frames.",
        trail.len(),
        frame_count
    );

    let filename = frames_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| frames_dir.display().to_string());

    // Seed the document's heatmap parameters from the user's config so a
    // later `render` starts from their preferred defaults.
    let heatmap = HeatmapSettings {
        resolution: config.heatmap.resolution,
        blur_size: config.heatmap.blur_size,
        alpha_max: config.heatmap.alpha_max,
        colormap: config.heatmap.colormap.parse().unwrap_or_default(),
    }
    .normalized();

    let document = TrailDocument::new(
        VideoInfo {
            width,
            height,
            duration,
            fps,
            filename,
        },
        &trail,
        TimeWindow::full(duration),
        settings,
        heatmap,
    );
    document
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to write trail document: {e}"))?;

    println!("Trail written to: {}", output.display());
    Ok(())
}
