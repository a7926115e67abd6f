//! Cylindrical projections on the unit sphere.
//!
//! Equirectangular: x = λ, y = φ
//! Mercator:        x = λ, y = ln(tan(π/4 + φ/2))
//! Gall:            x = λ/√2, y = (1 + √2/2)·tan(φ/2)
//! Equal-area:      x = λ·cos(φs), y = sin(φ)/cos(φs)

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI, SQRT_2, TAU};

use crate::proj::common::NAN_PAIR;
use crate::proj::Projection;

/// Plate carrée.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon, lat)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        if y.abs() > FRAC_PI_2 {
            return NAN_PAIR;
        }
        (y, x)
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, PI)
    }
}

/// Spherical Mercator. The poles are at infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mercator;

impl Projection for Mercator {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        // tan(π/2) is finite in floating point, so the poles are caught here
        if lat.abs() >= FRAC_PI_2 {
            return NAN_PAIR;
        }
        (lon, (FRAC_PI_4 + lat / 2.0).tan().ln())
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (2.0 * y.exp().atan() - FRAC_PI_2, x)
    }

    fn extent(&self) -> (f64, f64) {
        // square window, cut at about ±85°
        (TAU, TAU)
    }
}

/// Gall stereographic: perspective onto a secant cylinder at ±45°.
#[derive(Debug, Clone, Copy, Default)]
pub struct GallStereographic;

const GALL_Y: f64 = 1.0 + FRAC_1_SQRT_2;

impl Projection for GallStereographic {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon / SQRT_2, GALL_Y * (lat / 2.0).tan())
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lat = 2.0 * (y / GALL_Y).atan();
        if lat.abs() > FRAC_PI_2 {
            return NAN_PAIR;
        }
        (lat, x * SQRT_2)
    }

    fn extent(&self) -> (f64, f64) {
        (TAU / SQRT_2, 2.0 * GALL_Y)
    }
}

/// Cylindrical equal-area with true scale along the parallels ±φs.
#[derive(Debug, Clone, Copy)]
pub struct CylindricalEqualArea {
    cos_std: f64,
}

impl CylindricalEqualArea {
    /// `std_parallel` in radians.
    pub fn new(std_parallel: f64) -> Self {
        Self {
            cos_std: std_parallel.cos(),
        }
    }
}

impl Default for CylindricalEqualArea {
    fn default() -> Self {
        Self::new(30f64.to_radians())
    }
}

impl Projection for CylindricalEqualArea {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon * self.cos_std, lat.sin() / self.cos_std)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let s = y * self.cos_std;
        if s.abs() > 1.0 {
            return NAN_PAIR;
        }
        (s.asin(), x / self.cos_std)
    }

    fn extent(&self) -> (f64, f64) {
        (TAU * self.cos_std, 2.0 / self.cos_std)
    }
}
