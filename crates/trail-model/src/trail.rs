//! The cursor trail: one detection pass's position history.

use crate::sample::PositionSample;
use crate::settings::TimeWindow;

/// Time-ordered cursor positions covering one full pass over a video.
///
/// A trail is rebuilt wholesale by each detection pass and is read-only to
/// consumers afterwards; readers take time-range slices, never mutate. A new
/// pass replaces the previous trail as a whole value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorTrail {
    samples: Vec<PositionSample>,
}

impl CursorTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trail from samples already ordered by timestamp.
    pub fn from_samples(samples: Vec<PositionSample>) -> Self {
        debug_assert!(
            samples
                .windows(2)
                .all(|pair| pair[0].timestamp_secs <= pair[1].timestamp_secs),
            "trail samples must be time-ordered"
        );
        Self { samples }
    }

    /// Append a sample. Timestamps must be non-decreasing; the detection
    /// pass guarantees this by construction.
    pub fn push(&mut self, sample: PositionSample) {
        debug_assert!(
            self.samples
                .last()
                .map_or(true, |last| last.timestamp_secs <= sample.timestamp_secs),
            "trail samples must be appended in time order"
        );
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples, earliest first.
    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    /// Consume the trail into its sample vector.
    pub fn into_samples(self) -> Vec<PositionSample> {
        self.samples
    }

    /// Timestamp of the last sample, or 0 for an empty trail.
    pub fn duration_secs(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.timestamp_secs)
    }

    /// Samples with `start <= t <= end`, inclusive at both boundaries.
    ///
    /// An inverted window (`start > end`) yields an empty slice.
    pub fn samples_in(&self, window: TimeWindow) -> &[PositionSample] {
        if window.is_empty() {
            return &[];
        }
        let start = self
            .samples
            .partition_point(|s| s.timestamp_secs < window.start_secs);
        let end = self
            .samples
            .partition_point(|s| s.timestamp_secs <= window.end_secs);
        &self.samples[start..end]
    }
}

impl FromIterator<PositionSample> for CursorTrail {
    fn from_iter<I: IntoIterator<Item = PositionSample>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_trail() -> CursorTrail {
        (0..10)
            .map(|i| PositionSample::new(i as f64 * 0.5, i * 10, i * 10))
            .collect()
    }

    #[test]
    fn window_slice_is_inclusive_at_boundaries() {
        let trail = diagonal_trail();

        // Samples at t = 1.0 and t = 2.0 sit exactly on the boundaries.
        let slice = trail.samples_in(TimeWindow::new(1.0, 2.0));
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.first().unwrap().timestamp_secs, 1.0);
        assert_eq!(slice.last().unwrap().timestamp_secs, 2.0);
    }

    #[test]
    fn full_window_returns_all_samples() {
        let trail = diagonal_trail();
        let slice = trail.samples_in(TimeWindow::new(f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(slice.len(), trail.len());
    }

    #[test]
    fn inverted_window_returns_empty_slice() {
        let trail = diagonal_trail();
        assert!(trail.samples_in(TimeWindow::new(3.0, 1.0)).is_empty());
    }

    #[test]
    fn window_outside_trail_returns_empty_slice() {
        let trail = diagonal_trail();
        assert!(trail.samples_in(TimeWindow::new(100.0, 200.0)).is_empty());
    }

    #[test]
    fn empty_trail_has_zero_duration() {
        let trail = CursorTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.duration_secs(), 0.0);
        assert!(trail.samples_in(TimeWindow::new(0.0, 1.0)).is_empty());
    }

    #[test]
    fn duration_is_last_timestamp() {
        let trail = diagonal_trail();
        assert_eq!(trail.duration_secs(), 4.5);
    }
}
