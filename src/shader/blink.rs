//! Eye closure schedule.
//!
//! Time is cut into 500 s buckets, each holding 100 candidate blinks at
//! hashed offsets. A blink closes over 75 ms and reopens over 75 ms.

use super::math::pseudo_random;

/// Full close + reopen time (seconds)
pub const BLINK_WINDOW: f64 = 0.15;
const HALF_WINDOW: f64 = BLINK_WINDOW / 2.0;
/// Width of one scheduling bucket (seconds)
pub const BUCKET: f64 = 500.0;
const SLOTS: u32 = 100;

/// Closure at `since` seconds into a blink: 0 open, 1 closed
pub fn blink_profile(since: f64) -> f64 {
    if !(0.0..BLINK_WINDOW).contains(&since) {
        0.0
    } else if since < HALF_WINDOW {
        since / HALF_WINDOW
    } else {
        1.0 - (since - HALF_WINDOW) / HALF_WINDOW
    }
}

/// Start time of candidate blink `slot` in bucket `bucket`
pub fn candidate_start(bucket: f64, slot: u32) -> f64 {
    let seed = bucket * 1000.0 + slot as f64;
    bucket * BUCKET + pseudo_random(seed * 123.0) * BUCKET
}

/// Candidate blink starts for the bucket containing `t`, in probe order
pub fn candidates(t: f64) -> impl Iterator<Item = f64> {
    let bucket = (t / BUCKET).floor();
    (0..SLOTS).map(move |slot| candidate_start(bucket, slot))
}

/// Eye closure at time `t` (seconds). The first candidate window that
/// contains `t` wins; overlapping blinks are not layered.
pub fn blink_at(t: f64) -> f64 {
    candidates(t)
        .map(|start| t - start)
        .find(|since| (0.0..BLINK_WINDOW).contains(since))
        .map_or(0.0, blink_profile)
}
