//! Write a synthetic moving-disk clip as a frame sequence.

use std::path::PathBuf;

use heatrail_frame_source::SyntheticClip;

pub fn run(
    dir: PathBuf,
    width: u32,
    height: u32,
    fps: f64,
    duration: f64,
    radius: i32,
) -> anyhow::Result<()> {
    if fps <= 0.0 || duration <= 0.0 {
        anyhow::bail!("fps and duration must be positive");
    }

    let frame_count = (fps * duration).round() as u64;
    let margin = f64::from(radius.max(1)) + 6.0;
    let clip = SyntheticClip {
        width,
        height,
        fps,
        frame_count,
        start: (margin, margin),
        end: (f64::from(width) - margin, f64::from(height) - margin),
        disk_radius: radius,
        ..Default::default()
    };

    std::fs::create_dir_all(&dir)?;
    for index in 0..frame_count {
        let frame = clip.frame_at(index);
        let path = dir.join(format!("frame_{index:05}.png"));
        frame
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
    }

    println!(
        "Wrote {frame_count} frames ({width}x{height} @ {fps} fps) to {}",
        dir.display()
    );
    println!("Track it with: heatrail track {} --fps {fps}", dir.display());
    Ok(())
}
