//! Eye ellipses and the inside/outside test

use super::blink::blink_at;
use super::math::Vec2;
use super::motion::{offset_in, resolve_cycle_from, CycleSpan};

/// Open eye radius in normalized units
pub const EYE_RADIUS: f64 = 0.4;
/// Vertical scale left when fully closed
const CLOSED_SCALE: f64 = 0.05;

/// Ellipse radii for one blink state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeShape {
    pub horizontal: f64,
    pub vertical: f64,
}

impl EyeShape {
    /// `progress` 0 = open circle, 1 = squashed to 5% height
    pub fn from_blink(progress: f64) -> Self {
        let vertical_scale = 1.0 - progress * (1.0 - CLOSED_SCALE);
        Self {
            horizontal: EYE_RADIUS,
            vertical: EYE_RADIUS * vertical_scale,
        }
    }
}

/// Signed ellipse distance: negative inside, zero on the rim
pub fn ellipse_distance(point: Vec2, center: Vec2, shape: EyeShape) -> f64 {
    let dx = (point.x - center.x) / shape.horizontal;
    let dy = (point.y - center.y) / shape.vertical;
    (dx * dx + dy * dy).sqrt() - 1.0
}

/// Look direction and lid state at one instant, shared by both eyes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaze {
    pub offset: Vec2,
    pub shape: EyeShape,
}

impl Gaze {
    /// Gaze at `t` seconds, resuming the cycle scan from `hint`
    pub fn at(t: f64, hint: CycleSpan) -> Self {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        let span = resolve_cycle_from(hint, t);
        Self {
            offset: offset_in(span, t),
            shape: EyeShape::from_blink(blink_at(t)),
        }
    }
}

/// Base eye centers, symmetric about the screen center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyePair {
    pub left: Vec2,
    pub right: Vec2,
}

impl EyePair {
    pub fn symmetric(spread: f64) -> Self {
        Self {
            left: Vec2::new(-spread, 0.0),
            right: Vec2::new(spread, 0.0),
        }
    }

    /// Eye centers after the shared offset
    pub fn centers(&self, offset: Vec2) -> (Vec2, Vec2) {
        (self.left + offset, self.right + offset)
    }

    /// Nearest signed distance to either eye
    pub fn distance(&self, st: Vec2, gaze: &Gaze) -> f64 {
        let (left, right) = self.centers(gaze.offset);
        ellipse_distance(st, left, gaze.shape).min(ellipse_distance(st, right, gaze.shape))
    }

    pub fn contains(&self, st: Vec2, gaze: &Gaze) -> bool {
        self.distance(st, gaze) < 0.0
    }
}
