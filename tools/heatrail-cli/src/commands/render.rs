//! Build a windowed heatmap and composite it onto a frame.

use std::path::PathBuf;

use heatrail_frame_source::{FrameSource, ImageSequenceSource};
use heatrail_render::{composite, DensityFieldBuilder};
use heatrail_trail_model::{Colormap, TimeWindow, TrailDocument};

#[allow(clippy::too_many_arguments)]
pub fn run(
    frames_dir: PathBuf,
    trail_path: PathBuf,
    at: f64,
    start: Option<f64>,
    end: Option<f64>,
    resolution: Option<u32>,
    blur: Option<u32>,
    alpha: Option<f32>,
    colormap: Option<String>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let document = TrailDocument::load(&trail_path)
        .map_err(|e| anyhow::anyhow!("Failed to load trail document: {e}"))?;
    let trail = document.trail();

    let mut settings = document.heatmap;
    if let Some(resolution) = resolution {
        settings.resolution = resolution;
    }
    if let Some(blur) = blur {
        settings.blur_size = blur;
    }
    if let Some(alpha) = alpha {
        settings.alpha_max = alpha;
    }
    if let Some(name) = colormap {
        settings.colormap = name
            .parse::<Colormap>()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }
    let settings = settings.normalized();

    let window = TimeWindow::new(
        start.unwrap_or(document.window.start_secs),
        end.unwrap_or(document.window.end_secs),
    );

    let mut source = ImageSequenceSource::open(&frames_dir, document.video.fps)
        .map_err(|e| anyhow::anyhow!("Failed to open frame sequence: {e}"))?;

    let frame = source
        .frame_at_secs(at)
        .map_err(|e| anyhow::anyhow!("Failed to read frame at {at}s: {e}"))?
        .ok_or_else(|| anyhow::anyhow!("No frame at {at}s (clip ends earlier)"))?;

    let builder = DensityFieldBuilder::for_frame(&frame);
    let field = builder.build(&trail, window, settings.point_radius(), settings.blur_size);

    let samples = trail.samples_in(window).len();
    println!(
        "Window [{:.2}s, {:.2}s]: {} of {} samples",
        window.start_secs,
        window.end_secs,
        samples,
        trail.len()
    );
    println!(
        "Heatmap: colormap={} resolution={} blur={} alpha={:.2}",
        settings.colormap, settings.resolution, settings.blur_size, settings.alpha_max
    );

    let rendered = composite(&frame, &field, settings.colormap, settings.alpha_max);
    rendered
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;

    println!("Heatmap frame written to: {}", output.display());
    Ok(())
}
