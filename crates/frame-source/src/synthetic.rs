//! Procedurally generated clips: a bright disk moving over a flat
//! background.
//!
//! Deterministic by construction, so tests can re-derive the exact frame
//! for any index and compare detector output against the known path.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use heatrail_common::error::HeatrailResult;

use crate::{Frame, FrameSource};

/// Description of a synthetic clip.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticClip {
    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Nominal frame rate.
    pub fps: f64,

    /// Total frames in the clip.
    pub frame_count: u64,

    /// Disk center on the first frame.
    pub start: (f64, f64),

    /// Disk center on the last frame; intermediate frames interpolate
    /// linearly.
    pub end: (f64, f64),

    /// Disk radius in pixels.
    pub disk_radius: i32,

    /// Background color.
    pub background: Rgb<u8>,

    /// Disk color.
    pub disk_color: Rgb<u8>,
}

impl Default for SyntheticClip {
    /// A 10-second, 10 fps, 100x100 clip with a bright disk moving
    /// linearly from (10, 10) to (90, 90).
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            fps: 10.0,
            frame_count: 100,
            start: (10.0, 10.0),
            end: (90.0, 90.0),
            disk_radius: 4,
            background: Rgb([24, 24, 28]),
            disk_color: Rgb([235, 235, 235]),
        }
    }
}

impl SyntheticClip {
    /// Disk center on frame `index`, clamped to the clip length.
    pub fn center_at(&self, index: u64) -> (f64, f64) {
        if self.frame_count <= 1 {
            return self.start;
        }
        let t = index.min(self.frame_count - 1) as f64 / (self.frame_count - 1) as f64;
        (
            self.start.0 + (self.end.0 - self.start.0) * t,
            self.start.1 + (self.end.1 - self.start.1) * t,
        )
    }

    /// Render frame `index`.
    pub fn frame_at(&self, index: u64) -> Frame {
        let mut frame = RgbImage::from_pixel(self.width, self.height, self.background);
        let (cx, cy) = self.center_at(index);
        draw_filled_circle_mut(
            &mut frame,
            (cx.round() as i32, cy.round() as i32),
            self.disk_radius,
            self.disk_color,
        );
        frame
    }
}

/// A [`FrameSource`] that renders a [`SyntheticClip`] on demand.
pub struct SyntheticSource {
    clip: SyntheticClip,
    cursor: u64,
}

impl SyntheticSource {
    pub fn new(clip: SyntheticClip) -> Self {
        Self { clip, cursor: 0 }
    }

    pub fn clip(&self) -> &SyntheticClip {
        &self.clip
    }
}

impl FrameSource for SyntheticSource {
    fn frame_count(&self) -> u64 {
        self.clip.frame_count
    }

    fn fps(&self) -> f64 {
        self.clip.fps
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.clip.width, self.clip.height)
    }

    fn seek(&mut self, frame_index: u64) -> HeatrailResult<()> {
        self.cursor = frame_index.min(self.clip.frame_count);
        Ok(())
    }

    fn read_next(&mut self) -> HeatrailResult<Option<Frame>> {
        if self.cursor >= self.clip.frame_count {
            return Ok(None);
        }
        let frame = self.clip.frame_at(self.cursor);
        self.cursor += 1;
        Ok(Some(frame))
    }
}
