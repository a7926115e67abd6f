//! Lambert Conformal Conic on the sphere, one standard parallel.
//!
//!   n = sin(φ₁)
//!   F = cos(φ₁)·tanⁿ(π/4 + φ₁/2) / n
//!   ρ = F / tanⁿ(π/4 + φ/2)
//!   x = ρ·sin(nλ), y = −ρ·cos(nλ)
//!
//! The apex (north pole) sits at the origin; the south pole is at infinity.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use crate::proj::common::NAN_PAIR;
use crate::proj::Projection;

#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    n: f64,     // cone constant
    f_val: f64, // F
}

impl LambertConformalConic {
    /// `std_parallel` in radians, strictly between 0 and π/2.
    pub fn new(std_parallel: f64) -> Self {
        let n = std_parallel.sin();
        let f_val = std_parallel.cos() * (FRAC_PI_4 + std_parallel / 2.0).tan().powf(n) / n;
        Self { n, f_val }
    }

    fn rho(&self, lat: f64) -> f64 {
        self.f_val / (FRAC_PI_4 + lat / 2.0).tan().powf(self.n)
    }

    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

impl Default for LambertConformalConic {
    fn default() -> Self {
        Self::new(FRAC_PI_4)
    }
}

impl Projection for LambertConformalConic {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if lat <= -FRAC_PI_2 {
            return NAN_PAIR;
        }
        let rho = self.rho(lat);
        let (s, c) = (self.n * lon).sin_cos();
        (rho * s, -rho * c)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let rho = x.hypot(y);
        if rho == 0.0 {
            return (FRAC_PI_2, 0.0);
        }
        let theta = x.atan2(-y);
        let lat = 2.0 * (self.f_val / rho).powf(1.0 / self.n).atan() - FRAC_PI_2;
        (lat, theta / self.n)
    }

    fn extent(&self) -> (f64, f64) {
        // square around the apex, cut at 30°S
        let r = self.rho(-FRAC_PI_6);
        (2.0 * r, 2.0 * r)
    }
}
