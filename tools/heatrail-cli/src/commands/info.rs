//! Show trail document information.

use std::path::PathBuf;

use heatrail_trail_model::TrailDocument;

pub fn run(trail_path: PathBuf, json: bool) -> anyhow::Result<()> {
    let document = TrailDocument::load(&trail_path)
        .map_err(|e| anyhow::anyhow!("Failed to load trail document: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let v = &document.video;

    println!("Trail: {}", trail_path.display());
    if !document.created_at.is_empty() {
        println!("  Created: {}", document.created_at);
    }
    println!();

    println!("Video:");
    println!("  Source: {}", v.filename);
    println!(
        "  Resolution: {}x{} @ {} fps ({:.1}s)",
        v.width, v.height, v.fps, v.duration
    );
    println!();

    let trail = document.trail();
    println!("Positions: {}", trail.len());
    if let (Some(first), Some(last)) = (trail.samples().first(), trail.samples().last()) {
        println!(
            "  Time span: {:.2}s .. {:.2}s",
            first.timestamp_secs, last.timestamp_secs
        );
    }
    println!();

    println!("Detection settings:");
    println!("  Threshold: {}", document.detection.threshold);
    println!(
        "  Area: [{}, {}]",
        document.detection.min_area, document.detection.max_area
    );
    println!();

    println!("Heatmap settings:");
    println!("  Colormap: {}", document.heatmap.colormap);
    println!("  Resolution: {}", document.heatmap.resolution);
    println!("  Blur: {}", document.heatmap.blur_size);
    println!("  Alpha: {:.2}", document.heatmap.alpha_max);
    println!(
        "  Window: [{:.2}s, {:.2}s]",
        document.window.start_secs, document.window.end_secs
    );

    Ok(())
}
