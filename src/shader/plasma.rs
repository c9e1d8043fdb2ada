//! Plasma background: a rotating sine band plus rings around an orbiting center

use super::math::{map_range, Vec2};
use super::{CellOutput, FontWeight};

/// Glyph ramp, indexed from the low end of the field
pub const RAMP: [char; 15] = [
    '$', '?', '0', '1', '▄', 'a', 'b', 'c', '+', '-', '>', '<', ':', '.', ' ',
];

const FIELD_MIN: f64 = -2.0;
const FIELD_MAX: f64 = 2.0;

/// Field value in [-2, 2] for a raw cell coordinate `coord`, its
/// aspect-corrected position `st` and the elapsed time in milliseconds
pub fn field(coord: Vec2, st: Vec2, time_ms: f64) -> f64 {
    let t1 = time_ms * 0.0009;

    let center = Vec2::new((-t1).sin(), (-t1).cos());
    let band = (coord.dot(Vec2::new(t1.sin(), t1.cos())) * 0.08).sin();
    let rings = ((st - center).length() * 4.0).cos();
    band + rings
}

/// Ramp index for a field value, always in bounds
pub fn glyph_index(value: f64) -> usize {
    let scaled = (map_range(value, FIELD_MIN, FIELD_MAX, 0.0, 1.0) * RAMP.len() as f64).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, (RAMP.len() - 1) as f64) as usize
}

/// Field value as 0..=255 brightness
pub fn brightness(value: f64) -> u8 {
    let b = map_range(value, FIELD_MIN, FIELD_MAX, 0.0, 255.0).floor();
    if b.is_nan() {
        return 0;
    }
    b.clamp(0.0, 255.0) as u8
}

/// Three weight tiers stand in for color on a monochrome display
pub fn weight_for(brightness: u8) -> FontWeight {
    match brightness {
        181..=255 => FontWeight::HEAVY,
        101..=180 => FontWeight::NORMAL,
        _ => FontWeight::THIN,
    }
}

/// Plasma cell for the given position and time
pub fn shade(coord: Vec2, st: Vec2, time_ms: f64) -> CellOutput {
    let v = field(coord, st, time_ms);
    CellOutput::mono(RAMP[glyph_index(v)], weight_for(brightness(v)))
}
