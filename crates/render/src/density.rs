//! Spatial density estimation over a time window of the trail.

use image::{ImageBuffer, Luma, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use heatrail_trail_model::{CursorTrail, TimeWindow};

/// Scalar plane backing a density field.
pub type DensityPlane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// A non-negative per-pixel density surface at frame resolution.
///
/// Fields carry no persisted identity: they are recomputed on every query
/// and discarded after compositing.
#[derive(Debug, Clone)]
pub struct DensityField {
    plane: DensityPlane,
}

impl DensityField {
    /// An all-zero field.
    pub fn zero(width: u32, height: u32) -> Self {
        Self {
            plane: DensityPlane::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.plane.width()
    }

    pub fn height(&self) -> u32 {
        self.plane.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.plane.dimensions()
    }

    /// Density at a pixel.
    pub fn value_at(&self, x: u32, y: u32) -> f32 {
        self.plane.get_pixel(x, y)[0]
    }

    /// Largest density in the field; 0 for an all-zero field.
    pub fn max_value(&self) -> f32 {
        self.plane.as_raw().iter().copied().fold(0.0, f32::max)
    }

    /// Whether every pixel is zero.
    pub fn is_zero(&self) -> bool {
        self.plane.as_raw().iter().all(|v| *v == 0.0)
    }
}

/// Builds density fields for one frame geometry.
#[derive(Debug, Clone, Copy)]
pub struct DensityFieldBuilder {
    width: u32,
    height: u32,
}

impl DensityFieldBuilder {
    /// A builder for frames of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A builder matching a frame.
    pub fn for_frame(frame: &RgbImage) -> Self {
        Self::new(frame.width(), frame.height())
    }

    /// Build the density field for the trail samples inside `window`
    /// (inclusive at both boundaries).
    ///
    /// Each surviving sample splats a filled disk of `point_radius`
    /// (clamped to at least 1), adding 1.0 per covered pixel so revisited
    /// areas accumulate. If anything was splatted the field is smoothed
    /// with a Gaussian of kernel size `blur_size` (even values corrected
    /// upward to odd); an empty window skips the blur and returns the
    /// zero field directly.
    ///
    /// An inverted window (`start > end`) yields the zero field.
    pub fn build(
        &self,
        trail: &CursorTrail,
        window: TimeWindow,
        point_radius: u32,
        blur_size: u32,
    ) -> DensityField {
        let mut plane = DensityPlane::new(self.width, self.height);

        let radius = point_radius.max(1) as i64;
        let mut splatted = 0usize;
        for sample in trail.samples_in(window) {
            if !sample.in_bounds(self.width, self.height) {
                continue;
            }
            splat_disk(&mut plane, i64::from(sample.x), i64::from(sample.y), radius);
            splatted += 1;
        }

        if splatted == 0 {
            return DensityField { plane };
        }

        let kernel = if blur_size % 2 == 1 {
            blur_size.max(3)
        } else {
            (blur_size + 1).max(3)
        };
        let sigma = sigma_for_kernel(kernel);

        tracing::debug!(splatted, kernel, sigma, "Built density field");

        DensityField {
            plane: gaussian_blur_f32(&plane, sigma),
        }
    }
}

/// Add 1.0 to every pixel within `radius` of the center, clipped to the
/// plane.
fn splat_disk(plane: &mut DensityPlane, cx: i64, cy: i64, radius: i64) {
    let (width, height) = (i64::from(plane.width()), i64::from(plane.height()));
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            plane.get_pixel_mut(x as u32, y as u32)[0] += 1.0;
        }
    }
}

/// Gaussian sigma for an odd kernel size, matching the conventional
/// `0.3·((k − 1)/2 − 1) + 0.8` relation.
fn sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel - 1) as f32 * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatrail_trail_model::PositionSample;

    fn trail_of(points: &[(f64, u32, u32)]) -> CursorTrail {
        points.iter().map(|&p| PositionSample::from(p)).collect()
    }

    #[test]
    fn empty_trail_yields_zero_field() {
        let builder = DensityFieldBuilder::new(64, 64);
        let field = builder.build(&CursorTrail::new(), TimeWindow::new(0.0, 10.0), 5, 15);
        assert!(field.is_zero());
        assert_eq!(field.max_value(), 0.0);
    }

    #[test]
    fn window_with_no_samples_yields_zero_field() {
        let builder = DensityFieldBuilder::new(64, 64);
        let trail = trail_of(&[(1.0, 10, 10), (2.0, 20, 20)]);
        let field = builder.build(&trail, TimeWindow::new(5.0, 10.0), 5, 15);
        assert!(field.is_zero());
    }

    #[test]
    fn inverted_window_yields_zero_field() {
        let builder = DensityFieldBuilder::new(64, 64);
        let trail = trail_of(&[(1.0, 10, 10)]);
        let field = builder.build(&trail, TimeWindow::new(10.0, 0.0), 5, 15);
        assert!(field.is_zero());
    }

    #[test]
    fn boundary_samples_are_included() {
        let builder = DensityFieldBuilder::new(64, 64);
        let trail = trail_of(&[(1.0, 10, 10), (2.0, 40, 40)]);

        let exact = builder.build(&trail, TimeWindow::new(1.0, 2.0), 3, 3);
        let unbounded = builder.build(
            &trail,
            TimeWindow::new(f64::NEG_INFINITY, f64::INFINITY),
            3,
            3,
        );

        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(exact.value_at(x, y), unbounded.value_at(x, y));
            }
        }
    }

    #[test]
    fn out_of_bounds_samples_are_skipped() {
        let builder = DensityFieldBuilder::new(32, 32);
        let trail = trail_of(&[(1.0, 100, 100)]);
        let field = builder.build(&trail, TimeWindow::new(0.0, 10.0), 5, 15);
        assert!(field.is_zero());
    }

    #[test]
    fn overlapping_splats_accumulate() {
        let builder = DensityFieldBuilder::new(64, 64);
        let single = builder.build(&trail_of(&[(1.0, 32, 32)]), TimeWindow::new(0.0, 10.0), 5, 3);
        let double = builder.build(
            &trail_of(&[(1.0, 32, 32), (2.0, 32, 32)]),
            TimeWindow::new(0.0, 10.0),
            5,
            3,
        );
        assert!(double.value_at(32, 32) > single.value_at(32, 32));
    }

    #[test]
    fn density_peaks_at_the_sample() {
        let builder = DensityFieldBuilder::new(64, 64);
        let field = builder.build(&trail_of(&[(1.0, 32, 32)]), TimeWindow::new(0.0, 10.0), 4, 9);
        let peak = field.max_value();
        assert!(peak > 0.0);
        assert!(field.value_at(32, 32) >= peak * 0.99);
        assert_eq!(field.value_at(0, 0), 0.0);
    }

    #[test]
    fn zero_radius_is_treated_as_one() {
        let builder = DensityFieldBuilder::new(32, 32);
        let field = builder.build(&trail_of(&[(1.0, 16, 16)]), TimeWindow::new(0.0, 10.0), 0, 3);
        assert!(field.value_at(16, 16) > 0.0);
    }

    #[test]
    fn even_blur_size_does_not_panic() {
        let builder = DensityFieldBuilder::new(32, 32);
        let field = builder.build(&trail_of(&[(1.0, 16, 16)]), TimeWindow::new(0.0, 10.0), 3, 14);
        assert!(field.value_at(16, 16) > 0.0);
    }

    #[test]
    fn splats_near_the_edge_are_clipped() {
        let builder = DensityFieldBuilder::new(32, 32);
        let field = builder.build(&trail_of(&[(1.0, 0, 0)]), TimeWindow::new(0.0, 10.0), 5, 3);
        assert!(field.value_at(0, 0) > 0.0);
    }

    #[test]
    fn field_values_are_non_negative() {
        let builder = DensityFieldBuilder::new(48, 48);
        let trail = trail_of(&[(0.5, 10, 10), (1.0, 20, 30), (1.5, 40, 8)]);
        let field = builder.build(&trail, TimeWindow::new(0.0, 2.0), 6, 15);
        for y in 0..48 {
            for x in 0..48 {
                assert!(field.value_at(x, y) >= 0.0);
            }
        }
    }
}
