//! Look-direction drift shared by both eyes.
//!
//! Time is split into cycles: a short tween toward a new random offset
//! followed by a random hold. Nothing is stored between calls; the cycle
//! containing `t` is rediscovered by replaying durations from zero.

use super::math::{pseudo_random, Vec2};

/// Tween length at the start of each cycle (seconds)
pub const TRANSITION: f64 = 0.2;
/// Largest displacement on either axis
pub const OFFSET_RANGE: f64 = 0.6;

const HOLD_MIN: f64 = 0.5;
const HOLD_SPREAD: f64 = 3.5;

/// A resolved cycle: its index and the time (seconds) it began
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleSpan {
    pub index: u64,
    pub start: f64,
}

impl CycleSpan {
    pub const ZERO: CycleSpan = CycleSpan { index: 0, start: 0.0 };

    pub fn duration(&self) -> f64 {
        hold_duration(self.index) + TRANSITION
    }
}

/// Hold time for a cycle, 0.5..4.0 seconds
pub fn hold_duration(index: u64) -> f64 {
    HOLD_MIN + pseudo_random(index as f64 * 200.0) * HOLD_SPREAD
}

/// Offset in [-range, range] on both axes, x and y hashed from adjacent seeds
pub fn random_offset(seed: f64, range: f64) -> Vec2 {
    Vec2::new(
        (pseudo_random(seed) - 0.5) * 2.0 * range,
        (pseudo_random(seed + 1.0) - 0.5) * 2.0 * range,
    )
}

/// Find the cycle containing `t` by scanning from cycle 0
#[cfg(test)]
pub fn resolve_cycle(t: f64) -> CycleSpan {
    resolve_cycle_from(CycleSpan::ZERO, t)
}

/// Same as [`resolve_cycle`], resuming from `hint` when it starts at or
/// before `t`.
///
/// `hint` must itself come from a previous resolve call: the scan then
/// repeats the exact sums a scan from zero would, so the answer is identical.
pub fn resolve_cycle_from(hint: CycleSpan, t: f64) -> CycleSpan {
    let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
    let mut span = if hint.start <= t { hint } else { CycleSpan::ZERO };

    // Every cycle lasts at least HOLD_MIN + TRANSITION, so this ends
    // within t / 0.7 + 1 steps.
    loop {
        let duration = span.duration();
        if span.start + duration > t {
            return span;
        }
        span.start += duration;
        span.index += 1;
    }
}

/// Offset for time `t` inside an already resolved cycle
pub fn offset_in(span: CycleSpan, t: f64) -> Vec2 {
    let prev = random_offset(span.index as f64 * 100.0, OFFSET_RANGE);
    let next = random_offset((span.index + 1) as f64 * 100.0, OFFSET_RANGE);

    let phase = t - span.start;
    if phase < TRANSITION {
        prev.lerp(next, phase / TRANSITION)
    } else {
        next
    }
}

/// Current look offset for time `t` (seconds)
#[cfg(test)]
pub fn look_offset(t: f64) -> Vec2 {
    offset_in(resolve_cycle(t), t)
}
