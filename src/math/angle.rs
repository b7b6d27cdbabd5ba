use std::f64::consts::{PI, TAU};

/// Normalizes an angle to `[0, 2pi)`.
#[must_use]
pub fn normalize_between_zero_and_two_pi(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Normalizes an angle to `[lower, lower + 2pi)`.
#[must_use]
pub fn normalize_above(a: f64, lower: f64) -> f64 {
    lower + normalize_between_zero_and_two_pi(a - lower)
}

/// Normalizes an angle to `[center - pi, center + pi)`.
#[must_use]
pub fn normalize_around(a: f64, center: f64) -> f64 {
    normalize_above(a, center - PI)
}

/// Returns the shortest angular distance between two azimuths, in `[0, pi]`.
#[must_use]
pub fn azimuth_distance(a: f64, b: f64) -> f64 {
    normalize_around(a - b, 0.0).abs()
}
