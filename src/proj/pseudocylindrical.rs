//! Equal-area world maps with curved meridians.
//!
//! Sinusoidal: x = λ·cos(φ), y = φ
//! Mollweide:  x = (2√2/π)·λ·cos(θ), y = √2·sin(θ), where 2θ + sin(2θ) = π·sin(φ)
//! Hammer:     x = 2√2·cos(φ)·sin(λ/2)/√(1 + cos(φ)·cos(λ/2)),
//!             y = √2·sin(φ)/√(1 + cos(φ)·cos(λ/2))

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use crate::proj::common::NAN_PAIR;
use crate::proj::Projection;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sinusoidal;

impl Projection for Sinusoidal {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon * lat.cos(), lat)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        if y.abs() > FRAC_PI_2 {
            return NAN_PAIR;
        }
        let cos_lat = y.cos();
        if cos_lat.abs() < 1e-15 {
            // At the poles, longitude is undefined
            return (y, 0.0);
        }
        (y, x / cos_lat)
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, PI)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Mollweide;

const MOLLWEIDE_MAX_STEPS: usize = 32;
const MOLLWEIDE_TOLERANCE: f64 = 1e-13;

impl Mollweide {
    /// Auxiliary angle θ for latitude φ.
    fn auxiliary(lat: f64) -> f64 {
        if lat.abs() >= FRAC_PI_2 {
            return FRAC_PI_2.copysign(lat);
        }
        // iterate on t = 2θ: t + sin(t) = π·sin(φ)
        let target = PI * lat.sin();
        let mut t = 2.0 * lat;
        for _ in 0..MOLLWEIDE_MAX_STEPS {
            let step = (t + t.sin() - target) / (1.0 + t.cos());
            t -= step;
            if step.abs() < MOLLWEIDE_TOLERANCE {
                break;
            }
        }
        t / 2.0
    }
}

impl Projection for Mollweide {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let theta = Self::auxiliary(lat);
        (2.0 * SQRT_2 / PI * lon * theta.cos(), SQRT_2 * theta.sin())
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let s = y / SQRT_2;
        if s.abs() > 1.0 {
            return NAN_PAIR;
        }
        let theta = s.asin();
        let lat = ((2.0 * theta + (2.0 * theta).sin()) / PI).clamp(-1.0, 1.0).asin();
        let cos_theta = theta.cos();
        if cos_theta < 1e-15 {
            return (lat, 0.0);
        }
        (lat, PI * x / (2.0 * SQRT_2 * cos_theta))
    }

    fn extent(&self) -> (f64, f64) {
        (4.0 * SQRT_2, 2.0 * SQRT_2)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hammer;

impl Projection for Hammer {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_half, cos_half) = (lon / 2.0).sin_cos();
        let d = (1.0 + cos_lat * cos_half).sqrt();
        (2.0 * SQRT_2 * cos_lat * sin_half / d, SQRT_2 * sin_lat / d)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let z_sq = 1.0 - (x / 4.0).powi(2) - (y / 2.0).powi(2);
        // outside the bounding ellipse
        if z_sq < 0.5 {
            return NAN_PAIR;
        }
        let z = z_sq.sqrt();
        let lon = 2.0 * (z * x).atan2(2.0 * (2.0 * z_sq - 1.0));
        let lat = (z * y).clamp(-1.0, 1.0).asin();
        (lat, lon)
    }

    fn extent(&self) -> (f64, f64) {
        (4.0 * SQRT_2, 2.0 * SQRT_2)
    }
}
