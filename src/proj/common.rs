//! Common helpers for projection math (polar layout, sinc, iterative inverse).

use std::f64::consts::{FRAC_PI_2, PI};

use crate::numeric::newton_raphson_2d;

/// Returned for points a projection cannot represent.
pub const NAN_PAIR: (f64, f64) = (f64::NAN, f64::NAN);

/// Plane residual accepted by the Newton-based inverses.
pub const INVERSE_TOLERANCE: f64 = 1e-9;

/// Step of the central differences used for numerical Jacobians.
const JACOBIAN_STEP: f64 = 1e-6;

/// Slack allowed on the latitude/longitude range of an iterative solution.
const RANGE_SLACK: f64 = 1e-9;

/// Place a point at radius `r` and bearing `lon` around the origin, with the
/// prime meridian pointing down.
#[inline]
pub fn from_polar(r: f64, lon: f64) -> (f64, f64) {
    let (s, c) = lon.sin_cos();
    (r * s, -r * c)
}

/// Inverse of [`from_polar`]: `(r, lon)`.
#[inline]
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), x.atan2(-y))
}

/// `sin(x) / x`, with the limit 1 at the origin.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        x.sin() / x
    }
}

/// Invert a forward map with no closed-form inverse by 2-D Newton–Raphson
/// from `guess`, using a central-difference Jacobian.
///
/// Solutions outside `|lat| <= pi/2`, `|lon| <= pi` and failed iterations are
/// reported as [`NAN_PAIR`].
pub fn newton_inverse<F>(forward: F, x: f64, y: f64, guess: (f64, f64)) -> (f64, f64)
where
    F: Fn(f64, f64) -> (f64, f64),
{
    if !x.is_finite() || !y.is_finite() {
        return NAN_PAIR;
    }
    let h = JACOBIAN_STEP;
    let jacobian = |lat: f64, lon: f64| {
        let (xn, yn) = forward(lat + h, lon);
        let (xs, ys) = forward(lat - h, lon);
        let (xe, ye) = forward(lat, lon + h);
        let (xw, yw) = forward(lat, lon - h);
        [
            [(xn - xs) / (2.0 * h), (xe - xw) / (2.0 * h)],
            [(yn - ys) / (2.0 * h), (ye - yw) / (2.0 * h)],
        ]
    };

    match newton_raphson_2d((x, y), guess, &forward, jacobian, INVERSE_TOLERANCE) {
        Some((lat, lon)) if lat.abs() <= FRAC_PI_2 + RANGE_SLACK && lon.abs() <= PI + RANGE_SLACK => {
            (lat.clamp(-FRAC_PI_2, FRAC_PI_2), lon.clamp(-PI, PI))
        }
        _ => NAN_PAIR,
    }
}
