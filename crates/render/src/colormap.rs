//! Palette lookup tables.
//!
//! Each supported [`Colormap`] is an explicit table of control points
//! sampled with linear interpolation. The perceptual palettes (inferno,
//! plasma, viridis) use anchor colors sampled from their reference
//! definitions; hot and jet are piecewise-linear by construction.

use heatrail_trail_model::Colormap;

/// Control points as `(position, [r, g, b])` with positions ascending
/// over `[0, 1]`.
type ControlPoints = &'static [(f32, [u8; 3])];

const HOT: ControlPoints = &[
    (0.000, [0, 0, 0]),
    (0.365, [255, 0, 0]),
    (0.746, [255, 255, 0]),
    (1.000, [255, 255, 255]),
];

const JET: ControlPoints = &[
    (0.000, [0, 0, 128]),
    (0.125, [0, 0, 255]),
    (0.375, [0, 255, 255]),
    (0.625, [255, 255, 0]),
    (0.875, [255, 0, 0]),
    (1.000, [128, 0, 0]),
];

const INFERNO: ControlPoints = &[
    (0.0, [0, 0, 4]),
    (0.1, [22, 11, 57]),
    (0.2, [66, 10, 104]),
    (0.3, [106, 23, 110]),
    (0.4, [147, 38, 103]),
    (0.5, [188, 55, 84]),
    (0.6, [221, 81, 58]),
    (0.7, [243, 120, 25]),
    (0.8, [252, 165, 10]),
    (0.9, [246, 215, 70]),
    (1.0, [252, 255, 164]),
];

const PLASMA: ControlPoints = &[
    (0.0, [13, 8, 135]),
    (0.1, [69, 3, 158]),
    (0.2, [114, 1, 168]),
    (0.3, [156, 23, 158]),
    (0.4, [189, 55, 134]),
    (0.5, [216, 87, 107]),
    (0.6, [237, 121, 83]),
    (0.7, [251, 159, 58]),
    (0.8, [253, 202, 38]),
    (0.9, [249, 221, 51]),
    (1.0, [240, 249, 33]),
];

const VIRIDIS: ControlPoints = &[
    (0.0, [68, 1, 84]),
    (0.1, [72, 40, 120]),
    (0.2, [62, 74, 137]),
    (0.3, [49, 104, 142]),
    (0.4, [38, 130, 142]),
    (0.5, [31, 158, 137]),
    (0.6, [53, 183, 121]),
    (0.7, [109, 205, 89]),
    (0.8, [180, 222, 44]),
    (0.9, [216, 226, 25]),
    (1.0, [253, 231, 37]),
];

fn control_points(colormap: Colormap) -> ControlPoints {
    match colormap {
        Colormap::Hot => HOT,
        Colormap::Jet => JET,
        Colormap::Inferno => INFERNO,
        Colormap::Plasma => PLASMA,
        Colormap::Viridis => VIRIDIS,
    }
}

/// Map `t` (clamped to `[0, 1]`) through a palette.
pub fn sample(colormap: Colormap, t: f32) -> [u8; 3] {
    let points = control_points(colormap);
    let t = t.clamp(0.0, 1.0);

    let mut lower = points[0];
    for &upper in &points[1..] {
        if t <= upper.0 {
            let span = upper.0 - lower.0;
            let blend = if span > 0.0 { (t - lower.0) / span } else { 0.0 };
            return [
                lerp(lower.1[0], upper.1[0], blend),
                lerp(lower.1[1], upper.1[1], blend),
                lerp(lower.1[2], upper.1[2], blend),
            ];
        }
        lower = upper;
    }
    points[points.len() - 1].1
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
}
