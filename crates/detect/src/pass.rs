//! The full-video detection pass.
//!
//! A pass is a long-running, CPU-bound, sequential traversal: frame `i` is
//! differenced against frame `i - 1`, so the pass itself cannot be
//! parallelized internally, but it is independent of all interactive work
//! and should run off the interactive path (the CLI uses
//! `tokio::task::spawn_blocking`). The pass holds exclusive access to its
//! frame source for the whole run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use heatrail_common::error::{HeatrailError, HeatrailResult};
use heatrail_frame_source::{Frame, FrameSource};
use heatrail_trail_model::{CursorTrail, DetectionSettings, PositionSample};

use crate::detector::FrameDifferenceDetector;

/// Terminal state of a detection pass.
///
/// Cancellation is not an error: the pass either fully completes or yields
/// no trail. Partial trails are never produced.
#[derive(Debug)]
pub enum PassOutcome {
    /// The whole video was processed.
    Completed(CursorTrail),

    /// The pass was cancelled between frames; the partial trail was
    /// discarded.
    Cancelled,
}

/// Runs a [`FrameDifferenceDetector`] over an entire video to build a
/// fresh [`CursorTrail`].
pub struct DetectionPass {
    detector: FrameDifferenceDetector,
    cancel: Arc<AtomicBool>,
}

impl DetectionPass {
    pub fn new(settings: DetectionSettings) -> Self {
        Self {
            detector: FrameDifferenceDetector::new(settings),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag to request cancellation from another thread. Checked between
    /// frame iterations (coarse-grained; never mid-frame).
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Run the pass over `source`, reporting fractional progress in
    /// `[0, 1]` after each frame.
    ///
    /// The source is rewound to its first frame on completion so
    /// subsequent playback starts fresh. Timestamps derive as
    /// `frame_index / fps`, so the trail is time-ordered by construction.
    /// A read failure terminates the pass; no trail escapes a failed run.
    pub fn run<S, F>(&self, source: &mut S, mut progress: F) -> HeatrailResult<PassOutcome>
    where
        S: FrameSource,
        F: FnMut(f32),
    {
        let total_frames = source.frame_count();
        if total_frames == 0 {
            return Err(HeatrailError::source("Frame source has no frames"));
        }
        let fps = source.fps();
        if fps <= 0.0 {
            return Err(HeatrailError::source(format!(
                "Frame source reports a non-positive frame rate: {fps}"
            )));
        }

        tracing::info!(
            total_frames,
            fps,
            threshold = self.detector.settings().threshold,
            "Starting detection pass"
        );

        source.seek(0)?;

        let mut trail = CursorTrail::new();
        let mut previous: Option<Frame> = None;
        let mut index: u64 = 0;

        loop {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::info!(frames_processed = index, "Detection pass cancelled");
                return Ok(PassOutcome::Cancelled);
            }

            let Some(frame) = source.read_next()? else {
                break;
            };

            // Frame 0 only seeds the comparison pair.
            if let Some(prev) = previous.as_ref() {
                if let Some((x, y)) = self.detector.detect(&frame, prev) {
                    trail.push(PositionSample::new(index as f64 / fps, x, y));
                }
            }

            previous = Some(frame);
            index += 1;
            progress((index as f64 / total_frames as f64).min(1.0) as f32);
        }

        source.seek(0)?;

        tracing::info!(
            frames_processed = index,
            samples = trail.len(),
            "Detection pass complete"
        );
        Ok(PassOutcome::Completed(trail))
    }
}
