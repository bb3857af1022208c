//! Alpha compositing of a density field onto a video frame.

use image::{Rgb, RgbImage};

use heatrail_trail_model::Colormap;

use crate::colormap;
use crate::density::DensityField;

/// Overlay a density field onto a frame.
///
/// The field is normalized by its maximum (an all-zero field normalizes
/// to all zeros), mapped through `colormap`, and blended per channel with
/// per-pixel alpha `normalized × alpha_max`. Zero-density pixels are
/// bit-identical to the input frame, and the densest pixel reaches at
/// most `alpha_max` opacity.
pub fn composite(
    frame: &RgbImage,
    field: &DensityField,
    colormap: Colormap,
    alpha_max: f32,
) -> RgbImage {
    if frame.dimensions() != field.dimensions() {
        tracing::warn!(
            frame = ?frame.dimensions(),
            field = ?field.dimensions(),
            "Density field does not match frame dimensions; returning frame unchanged"
        );
        return frame.clone();
    }

    let max = field.max_value();
    let bound = if max > 0.0 { max } else { 1.0 };
    let alpha_max = alpha_max.clamp(0.0, 1.0);

    RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
        let normalized = field.value_at(x, y) / bound;
        let alpha = normalized * alpha_max;
        if alpha <= 0.0 {
            return *frame.get_pixel(x, y);
        }

        let overlay = colormap::sample(colormap, normalized);
        let base = frame.get_pixel(x, y);
        Rgb([
            blend(base[0], overlay[0], alpha),
            blend(base[1], overlay[1], alpha),
            blend(base[2], overlay[2], alpha),
        ])
    })
}

fn blend(base: u8, overlay: u8, alpha: f32) -> u8 {
    (f32::from(base) * (1.0 - alpha) + f32::from(overlay) * alpha)
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::DensityFieldBuilder;
    use heatrail_trail_model::{CursorTrail, PositionSample, TimeWindow};

    fn gradient_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 3) as u8, (y * 3) as u8, 60])
        })
    }

    fn peaked_field(width: u32, height: u32) -> DensityField {
        let trail: CursorTrail = [PositionSample::new(1.0, width / 2, height / 2)]
            .into_iter()
            .collect();
        DensityFieldBuilder::new(width, height).build(&trail, TimeWindow::new(0.0, 2.0), 6, 9)
    }

    #[test]
    fn zero_field_leaves_frame_unchanged() {
        let frame = gradient_frame(64, 64);
        let field = DensityField::zero(64, 64);
        let output = composite(&frame, &field, Colormap::Hot, 0.7);
        assert_eq!(output, frame);
    }

    #[test]
    fn zero_alpha_max_leaves_frame_unchanged() {
        let frame = gradient_frame(64, 64);
        let field = peaked_field(64, 64);
        let output = composite(&frame, &field, Colormap::Hot, 0.0);
        assert_eq!(output, frame);
    }

    #[test]
    fn dense_region_is_tinted_and_far_region_is_untouched() {
        let frame = gradient_frame(64, 64);
        let field = peaked_field(64, 64);
        let output = composite(&frame, &field, Colormap::Hot, 0.7);

        assert_ne!(output.get_pixel(32, 32), frame.get_pixel(32, 32));
        assert_eq!(output.get_pixel(2, 2), frame.get_pixel(2, 2));
    }

    #[test]
    fn peak_alpha_never_exceeds_alpha_max() {
        let frame = RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]));
        let field = peaked_field(64, 64);
        let alpha_max = 0.5;
        let output = composite(&frame, &field, Colormap::Hot, alpha_max);

        // Hot maps the normalized peak to white (255); on a black frame
        // the blended value is at most alpha_max * 255.
        let peak = output.get_pixel(32, 32);
        let ceiling = (alpha_max * 255.0).round() as u8;
        assert!(peak[0] <= ceiling, "r = {}", peak[0]);
    }

    #[test]
    fn output_stays_in_range_for_saturated_inputs() {
        let frame = RgbImage::from_pixel(32, 32, Rgb([255, 255, 255]));
        let field = peaked_field(32, 32);
        // No panic and no wraparound: every channel is a valid u8 by
        // construction; spot-check the peak stays white-ish under hot.
        let output = composite(&frame, &field, Colormap::Hot, 1.0);
        let peak = output.get_pixel(16, 16);
        assert_eq!(*peak, Rgb([255, 255, 255]));
    }

    #[test]
    fn mismatched_dimensions_return_the_frame() {
        let frame = gradient_frame(32, 32);
        let field = DensityField::zero(16, 16);
        let output = composite(&frame, &field, Colormap::Jet, 0.7);
        assert_eq!(output, frame);
    }
}
