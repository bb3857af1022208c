//! Heatrail Frame Sources
//!
//! A frame source decodes a video into sequential RGB raster frames and
//! supports random-access seeking by frame index or time. Two sources ship
//! with the workspace:
//! - [`ImageSequenceSource`]: a directory of numbered image files
//! - [`SyntheticSource`]: a procedurally generated clip for tests and demos
//!
//! A source is a single-reader resource: only one logical reader (a
//! detection pass or an interactive seek-and-display request) may be
//! positioned and reading at a time; callers serialize access. Opening is
//! construction and releasing is `Drop`.

pub mod image_sequence;
pub mod synthetic;

pub use image_sequence::ImageSequenceSource;
pub use synthetic::{SyntheticClip, SyntheticSource};

use heatrail_common::error::HeatrailResult;

/// A decoded video frame, 8-bit RGB.
pub type Frame = image::RgbImage;

/// Sequential, seekable access to the frames of one video.
pub trait FrameSource {
    /// Total number of frames.
    fn frame_count(&self) -> u64;

    /// Nominal frames per second.
    fn fps(&self) -> f64;

    /// Frame dimensions as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Position the source so the next read returns `frame_index`.
    ///
    /// Seeking at or past the end is not an error; the next read reports
    /// end of stream.
    fn seek(&mut self, frame_index: u64) -> HeatrailResult<()>;

    /// Read the frame at the current position and advance, or `None` at
    /// end of stream.
    fn read_next(&mut self) -> HeatrailResult<Option<Frame>>;

    /// Video duration in seconds.
    fn duration_secs(&self) -> f64 {
        let fps = self.fps();
        if fps > 0.0 {
            self.frame_count() as f64 / fps
        } else {
            0.0
        }
    }

    /// Position the source at the frame covering the given time.
    fn seek_secs(&mut self, secs: f64) -> HeatrailResult<()> {
        let index = (secs.max(0.0) * self.fps()) as u64;
        self.seek(index)
    }

    /// Random-access display path: seek to a time and read one frame.
    fn frame_at_secs(&mut self, secs: f64) -> HeatrailResult<Option<Frame>> {
        self.seek_secs(secs)?;
        self.read_next()
    }
}
