//! End-to-end scenario: a bright disk crossing a synthetic clip
//! diagonally, traced by a full detection pass, rendered into a heatmap.

use heatrail_detect::{DetectionPass, PassOutcome};
use heatrail_frame_source::{FrameSource, SyntheticClip, SyntheticSource};
use heatrail_render::{composite, DensityFieldBuilder};
use heatrail_trail_model::{Colormap, CursorTrail, DetectionSettings, TimeWindow};

/// 10 seconds at 10 fps, 100x100, disk moving (10,10) -> (90,90).
fn diagonal_clip() -> SyntheticClip {
    SyntheticClip::default()
}

fn run_pass(clip: SyntheticClip) -> CursorTrail {
    let mut source = SyntheticSource::new(clip);
    let pass = DetectionPass::new(DetectionSettings::default());
    match pass.run(&mut source, |_| {}).expect("pass should not fail") {
        PassOutcome::Completed(trail) => trail,
        PassOutcome::Cancelled => panic!("pass was not cancelled"),
    }
}

#[test]
fn pass_traces_a_monotonic_diagonal_path() {
    let trail = run_pass(diagonal_clip());

    // Integer rendering collapses some consecutive frames into identical
    // pairs, so not every frame detects; most should.
    assert!(
        trail.len() >= 50,
        "expected a dense trail, got {} samples",
        trail.len()
    );
    assert!(trail.len() < 100, "frame 0 never produces a sample");

    for sample in trail.samples() {
        // The path is the line y = x; detections may sit on the leading
        // or trailing edge of the moving disk but stay on the diagonal.
        let deviation = (f64::from(sample.x) - f64::from(sample.y)).abs();
        assert!(
            deviation <= 10.0,
            "sample ({}, {}) strays from the diagonal",
            sample.x,
            sample.y
        );
    }

    // Monotonic overall trend along the diagonal, allowing edge jitter.
    for pair in trail.samples().windows(2) {
        assert!(pair[0].timestamp_secs < pair[1].timestamp_secs);
        assert!(
            i64::from(pair[1].x) >= i64::from(pair[0].x) - 10,
            "x regressed from {} to {}",
            pair[0].x,
            pair[1].x
        );
    }

    let first = trail.samples().first().unwrap();
    let last = trail.samples().last().unwrap();
    assert!(
        i64::from(last.x) - i64::from(first.x) >= 50,
        "trail should span most of the diagonal"
    );
}

#[test]
fn heatmap_over_the_full_window_is_elevated_along_the_diagonal() {
    let clip = diagonal_clip();
    let trail = run_pass(clip);
    assert!(!trail.is_empty());

    let builder = DensityFieldBuilder::new(clip.width, clip.height);
    let field = builder.build(&trail, TimeWindow::new(0.0, 10.0), 5, 15);

    // Sample the field on and off the diagonal.
    let on_diagonal = field.value_at(50, 50);
    let off_diagonal = field.value_at(90, 10);
    assert!(on_diagonal > 0.0, "diagonal should carry density");
    assert!(
        off_diagonal < on_diagonal * 0.1,
        "far corner should be near-zero: on={on_diagonal}, off={off_diagonal}"
    );

    // Compositing tints the diagonal and leaves the empty corner alone.
    let mut source = SyntheticSource::new(clip);
    let frame = source.frame_at_secs(5.0).unwrap().unwrap();
    let output = composite(&frame, &field, Colormap::Hot, 0.7);

    assert_ne!(output.get_pixel(50, 50), frame.get_pixel(50, 50));
    assert_eq!(output.get_pixel(90, 10), frame.get_pixel(90, 10));
}

#[test]
fn windowed_heatmap_covers_only_the_matching_trail_segment() {
    let clip = diagonal_clip();
    let trail = run_pass(clip);
    assert!(!trail.is_empty());

    let builder = DensityFieldBuilder::new(clip.width, clip.height);

    // The first two seconds keep the disk near the start corner.
    let early = builder.build(&trail, TimeWindow::new(0.0, 2.0), 5, 15);
    assert!(early.value_at(20, 20) > 0.0);
    assert_eq!(early.value_at(85, 85), 0.0);

    // The last two seconds keep it near the end corner.
    let late = builder.build(&trail, TimeWindow::new(8.0, 10.0), 5, 15);
    assert!(late.value_at(85, 85) > 0.0);
    assert_eq!(late.value_at(20, 20), 0.0);
}
