//! A directory of numbered image files served as a video.

use std::path::{Path, PathBuf};

use heatrail_common::error::{HeatrailError, HeatrailResult};

use crate::{Frame, FrameSource};

/// Image file extensions recognized as frames.
const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Serves the image files of a directory, sorted by file name, as the
/// frames of one video.
///
/// File names are expected to be zero-padded (`frame_0000.png`, ...) so
/// lexicographic order is frame order. The frame rate is caller-supplied
/// since still images carry no timing metadata.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    fps: f64,
    width: u32,
    height: u32,
    cursor: u64,
}

impl ImageSequenceSource {
    /// Open a directory of frames. Probes the first image for dimensions.
    pub fn open(dir: impl AsRef<Path>, fps: f64) -> HeatrailResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(HeatrailError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }
        if fps <= 0.0 {
            return Err(HeatrailError::source(format!(
                "Frame rate must be positive, got {fps}"
            )));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(HeatrailError::source(format!(
                "No frame images found in {}",
                dir.display()
            )));
        }

        let probe = image::open(&paths[0])
            .map_err(|e| {
                HeatrailError::source(format!("Failed to decode {}: {e}", paths[0].display()))
            })?
            .to_rgb8();
        let (width, height) = probe.dimensions();

        tracing::debug!(
            frames = paths.len(),
            width,
            height,
            fps,
            "Opened image sequence"
        );

        Ok(Self {
            paths,
            fps,
            width,
            height,
            cursor: 0,
        })
    }
}

impl FrameSource for ImageSequenceSource {
    fn frame_count(&self) -> u64 {
        self.paths.len() as u64
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn seek(&mut self, frame_index: u64) -> HeatrailResult<()> {
        self.cursor = frame_index.min(self.frame_count());
        Ok(())
    }

    fn read_next(&mut self) -> HeatrailResult<Option<Frame>> {
        let Some(path) = self.paths.get(self.cursor as usize) else {
            return Ok(None);
        };

        let frame = image::open(path)
            .map_err(|e| HeatrailError::source(format!("Failed to decode {}: {e}", path.display())))?
            .to_rgb8();

        if frame.dimensions() != (self.width, self.height) {
            return Err(HeatrailError::source(format!(
                "Frame {} is {}x{}, expected {}x{}",
                path.display(),
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        self.cursor += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_sequence(dir: &Path, count: u32) {
        std::fs::create_dir_all(dir).unwrap();
        for i in 0..count {
            let mut frame = RgbImage::from_pixel(32, 24, Rgb([10, 10, 10]));
            // Stamp the frame index into a pixel so reads are identifiable.
            frame.put_pixel(0, 0, Rgb([i as u8, 0, 0]));
            frame.save(dir.join(format!("frame_{i:04}.png"))).unwrap();
        }
    }

    #[test]
    fn reads_frames_in_file_name_order() {
        let dir = std::env::temp_dir().join("heatrail_test_sequence_order");
        let _ = std::fs::remove_dir_all(&dir);
        write_sequence(&dir, 5);

        let mut source = ImageSequenceSource::open(&dir, 10.0).unwrap();
        assert_eq!(source.frame_count(), 5);
        assert_eq!(source.dimensions(), (32, 24));
        assert_eq!(source.duration_secs(), 0.5);

        for i in 0..5 {
            let frame = source.read_next().unwrap().unwrap();
            assert_eq!(frame.get_pixel(0, 0)[0], i as u8);
        }
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn seek_repositions_the_cursor() {
        let dir = std::env::temp_dir().join("heatrail_test_sequence_seek");
        let _ = std::fs::remove_dir_all(&dir);
        write_sequence(&dir, 5);

        let mut source = ImageSequenceSource::open(&dir, 10.0).unwrap();
        source.seek(3).unwrap();
        assert_eq!(source.read_next().unwrap().unwrap().get_pixel(0, 0)[0], 3);

        // Seeking past the end is not an error; the next read reports EOS.
        source.seek(100).unwrap();
        assert!(source.read_next().unwrap().is_none());

        // frame_at_secs maps time to index: 0.25s at 10 fps is frame 2.
        let frame = source.frame_at_secs(0.25).unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 2);
    }

    #[test]
    fn empty_directory_is_rejected() {
        let dir = std::env::temp_dir().join("heatrail_test_sequence_empty");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        assert!(ImageSequenceSource::open(&dir, 10.0).is_err());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = std::env::temp_dir().join("heatrail_test_sequence_missing");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(ImageSequenceSource::open(&dir, 10.0).is_err());
    }
}
