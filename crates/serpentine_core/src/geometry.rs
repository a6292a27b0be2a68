use std::f64::consts::{PI, TAU};

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `[-π, π]`.
#[must_use]
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let mut diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff -= TAU;
    }
    diff
}

/// Unsigned angular distance between two bearings, in `[0, π]`.
#[must_use]
pub fn angle_between(a: f64, b: f64) -> f64 {
    shortest_delta(a, b).abs()
}
