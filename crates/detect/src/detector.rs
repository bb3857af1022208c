//! Frame-difference cursor localization.
//!
//! Two consecutive frames are smoothed, differenced, thresholded, and
//! cleaned up morphologically; the surviving foreground blobs are measured
//! and filtered by size and shape so that compact, roughly round regions
//! (cursor-like) win over motion blur streaks and text-caret artifacts.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};
use imageproc::region_labelling::{connected_components, Connectivity};

use heatrail_trail_model::DetectionSettings;

/// Minimum circularity (`4π·area / perimeter²`) for a candidate blob.
/// Values near 1.0 indicate a compact round object; elongated motion blur
/// scores far lower. Empirically tuned.
pub const MIN_CIRCULARITY: f64 = 0.35;

/// Accepted bounding-box aspect ratio range. Cursors are roughly square.
pub const ASPECT_RATIO_RANGE: (f64, f64) = (0.5, 2.0);

/// Sigma of the fixed smoothing pass applied before differencing, to
/// suppress single-pixel sensor noise. Not configurable.
const PRE_DIFF_SIGMA: f32 = 1.1;

/// Locates the moving cursor in a pair of consecutive frames.
pub struct FrameDifferenceDetector {
    settings: DetectionSettings,
}

impl FrameDifferenceDetector {
    /// Create a detector. Settings are repaired via
    /// [`DetectionSettings::normalized`].
    pub fn new(settings: DetectionSettings) -> Self {
        Self {
            settings: settings.normalized(),
        }
    }

    /// The (normalized) settings this detector runs with.
    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    /// Detect the cursor position in `current` given the preceding frame.
    ///
    /// Returns the pixel centroid of the best-scoring motion blob, or
    /// `None` when nothing moved or no blob passes the filters. Frames of
    /// mismatched dimensions never match.
    pub fn detect(&self, current: &RgbImage, previous: &RgbImage) -> Option<(u32, u32)> {
        if current.dimensions() != previous.dimensions() {
            return None;
        }

        let mask = self.motion_mask(current, previous);
        let regions = measure_regions(&mask);

        regions
            .into_iter()
            .filter(|region| self.accepts(region))
            .max_by(|a, b| a.score().total_cmp(&b.score()))
            .map(|region| region.centroid())
    }

    /// Binary foreground mask of inter-frame motion.
    fn motion_mask(&self, current: &RgbImage, previous: &RgbImage) -> GrayImage {
        let (width, height) = current.dimensions();

        let gray_current = gaussian_blur_f32(&image::imageops::grayscale(current), PRE_DIFF_SIGMA);
        let gray_previous =
            gaussian_blur_f32(&image::imageops::grayscale(previous), PRE_DIFF_SIGMA);

        let threshold = self.settings.threshold;
        let binary = GrayImage::from_fn(width, height, |x, y| {
            let a = gray_current.get_pixel(x, y)[0];
            let b = gray_previous.get_pixel(x, y)[0];
            if a.abs_diff(b) > threshold {
                Luma([255])
            } else {
                Luma([0])
            }
        });

        // Open removes isolated noise pixels, close fills small gaps
        // within a real moving blob. 3x3 structuring element.
        let cleaned = close(&open(&binary, Norm::LInf, 1), Norm::LInf, 1);

        // A moving disk differences into a hollow ring (its interior is
        // unchanged between frames). Filling enclosed holes measures the
        // outer silhouette, matching external-contour semantics.
        fill_holes(&cleaned)
    }

    fn accepts(&self, region: &Region) -> bool {
        if region.area < self.settings.min_area || region.area > self.settings.max_area {
            return false;
        }
        if region.circularity() <= MIN_CIRCULARITY {
            return false;
        }
        let aspect = region.aspect_ratio();
        aspect >= ASPECT_RATIO_RANGE.0 && aspect <= ASPECT_RATIO_RANGE.1
    }
}

/// Pixel statistics of one foreground region.
#[derive(Debug, Clone, Copy)]
struct Region {
    area: u32,
    perimeter: u32,
    sum_x: u64,
    sum_y: u64,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl Region {
    fn empty() -> Self {
        Self {
            area: 0,
            perimeter: 0,
            sum_x: 0,
            sum_y: 0,
            min_x: u32::MAX,
            max_x: 0,
            min_y: u32::MAX,
            max_y: 0,
        }
    }

    fn add_pixel(&mut self, x: u32, y: u32, boundary: bool) {
        self.area += 1;
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        if boundary {
            self.perimeter += 1;
        }
    }

    /// `4π·area / perimeter²`; near 1.0 for a filled disk.
    fn circularity(&self) -> f64 {
        if self.perimeter == 0 {
            return 0.0;
        }
        4.0 * std::f64::consts::PI * f64::from(self.area)
            / (f64::from(self.perimeter) * f64::from(self.perimeter))
    }

    /// Bounding-box width over height.
    fn aspect_ratio(&self) -> f64 {
        let width = f64::from(self.max_x - self.min_x + 1);
        let height = f64::from(self.max_y - self.min_y + 1);
        width / height
    }

    /// Combined size-and-roundness score used to pick among survivors.
    fn score(&self) -> f64 {
        f64::from(self.area) * self.circularity()
    }

    /// First-moment pixel centroid, truncated to integer coordinates.
    fn centroid(&self) -> (u32, u32) {
        (
            (self.sum_x / u64::from(self.area)) as u32,
            (self.sum_y / u64::from(self.area)) as u32,
        )
    }
}

/// Label 8-connected foreground regions and accumulate their statistics.
///
/// The perimeter is the count of region pixels bordering background or the
/// frame edge (4-neighbourhood).
fn measure_regions(mask: &GrayImage) -> Vec<Region> {
    let (width, height) = mask.dimensions();
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut regions: Vec<Region> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let label = labels.get_pixel(x, y)[0] as usize;
            if label == 0 {
                continue;
            }
            if regions.len() < label {
                regions.resize_with(label, Region::empty);
            }
            regions[label - 1].add_pixel(x, y, is_boundary(mask, x, y));
        }
    }
    regions
}

fn is_boundary(mask: &GrayImage, x: u32, y: u32) -> bool {
    let (width, height) = mask.dimensions();
    x == 0
        || y == 0
        || x + 1 == width
        || y + 1 == height
        || mask.get_pixel(x - 1, y)[0] == 0
        || mask.get_pixel(x + 1, y)[0] == 0
        || mask.get_pixel(x, y - 1)[0] == 0
        || mask.get_pixel(x, y + 1)[0] == 0
}

/// Turn enclosed background pockets into foreground.
///
/// Background components that do not reach the frame border are holes
/// inside a blob; filling them makes region area, perimeter, and centroid
/// measure the blob's outer silhouette.
fn fill_holes(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();

    let inverted = GrayImage::from_fn(width, height, |x, y| {
        if mask.get_pixel(x, y)[0] == 0 {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    let labels = connected_components(&inverted, Connectivity::Four, Luma([0u8]));

    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut touches_border = vec![false; max_label + 1];
    for x in 0..width {
        touches_border[labels.get_pixel(x, 0)[0] as usize] = true;
        touches_border[labels.get_pixel(x, height - 1)[0] as usize] = true;
    }
    for y in 0..height {
        touches_border[labels.get_pixel(0, y)[0] as usize] = true;
        touches_border[labels.get_pixel(width - 1, y)[0] as usize] = true;
    }

    GrayImage::from_fn(width, height, |x, y| {
        let label = labels.get_pixel(x, y)[0] as usize;
        if label == 0 || touches_border[label] {
            *mask.get_pixel(x, y)
        } else {
            Luma([255])
        }
    })
}
