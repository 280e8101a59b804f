//! Scalar-to-color maps. Inputs outside `[0, 1]` are clamped; NaN maps to 0.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
    /// Full hue circle; 0 and 1 are both red, which suits periodic symbols
    Hsv,
    /// Blue -> red -> green
    Brg,
    /// Diverging blue -> light gray -> red
    Coolwarm,
    Viridis,
    Gray,
}

const COOLWARM: [(f64, [f64; 3]); 3] = [
    (0.0, [59.0, 76.0, 192.0]),
    (0.5, [221.0, 221.0, 221.0]),
    (1.0, [180.0, 4.0, 38.0]),
];

const VIRIDIS: [(f64, [f64; 3]); 5] = [
    (0.0, [68.0, 1.0, 84.0]),
    (0.25, [59.0, 82.0, 139.0]),
    (0.5, [33.0, 145.0, 140.0]),
    (0.75, [94.0, 201.0, 98.0]),
    (1.0, [253.0, 231.0, 37.0]),
];

impl ColorMap {
    pub fn color(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            ColorMap::Hsv => hsv_to_rgb(t * 360.0, 1.0, 1.0),
            ColorMap::Brg => {
                let (r, g, b) = if t <= 0.5 {
                    (2.0 * t, 0.0, 1.0 - 2.0 * t)
                } else {
                    (2.0 - 2.0 * t, 2.0 * t - 1.0, 0.0)
                };
                rgb_unit(r, g, b)
            }
            ColorMap::Coolwarm => piecewise(&COOLWARM, t),
            ColorMap::Viridis => piecewise(&VIRIDIS, t),
            ColorMap::Gray => rgb_unit(t, t, t),
        }
    }
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn rgb_unit(r: f64, g: f64, b: f64) -> RGBColor {
    RGBColor(to_byte(r), to_byte(g), to_byte(b))
}

fn piecewise(stops: &[(f64, [f64; 3])], t: f64) -> RGBColor {
    let upper = stops
        .iter()
        .position(|(s, _)| *s >= t)
        .unwrap_or(stops.len() - 1)
        .max(1);
    let (t0, c0) = stops[upper - 1];
    let (t1, c1) = stops[upper];
    let w = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
    let mix = |i: usize| (c0[i] + (c1[i] - c0[i]) * w).round().clamp(0.0, 255.0) as u8;
    RGBColor(mix(0), mix(1), mix(2))
}

/// `h` in degrees, `s` and `v` in `[0, 1]`.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RGBColor {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    rgb_unit(r + m, g + m, b + m)
}
