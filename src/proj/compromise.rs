//! Compromise world maps whose inverses are found iteratively.
//!
//! Aitoff:  α = acos(cos(φ)·cos(λ/2))
//!          x = 2·cos(φ)·sin(λ/2)/sinc(α), y = sin(φ)/sinc(α)
//! Winkel tripel: mean of Aitoff and equirectangular with φ₁ = acos(2/π)
//! Van der Grinten: the globe inside a circle of radius π

use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, FRAC_PI_3, PI, SQRT_2, TAU};

use crate::proj::common::{newton_inverse, sinc, NAN_PAIR};
use crate::proj::pseudocylindrical::Hammer;
use crate::proj::Projection;

/// Starting point for the Newton inverse of an elliptical world map with the
/// given half-axes: the Hammer inverse of the point rescaled onto Hammer's
/// ellipse.
fn hammer_seed(x: f64, y: f64, half_w: f64, half_h: f64) -> (f64, f64) {
    let seed = Hammer.inverse(x / half_w * 2.0 * SQRT_2, y / half_h * SQRT_2);
    if seed.0.is_nan() {
        (y / half_h * FRAC_PI_2, x / half_w * PI)
    } else {
        seed
    }
}

#[inline]
fn aitoff_xy(lat: f64, lon: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_half, cos_half) = (lon / 2.0).sin_cos();
    let alpha = (cos_lat * cos_half).clamp(-1.0, 1.0).acos();
    let s = sinc(alpha);
    (2.0 * cos_lat * sin_half / s, sin_lat / s)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Aitoff;

impl Projection for Aitoff {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        aitoff_xy(lat, lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        // inside the bounding ellipse (x/π)² + (y/(π/2))² ≤ 1
        if (x / PI).powi(2) + (y / FRAC_PI_2).powi(2) > 1.0 + 1e-12 {
            return NAN_PAIR;
        }
        newton_inverse(aitoff_xy, x, y, hammer_seed(x, y, PI, FRAC_PI_2))
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, PI)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WinkelTripel {
    cos_std: f64,
}

impl Default for WinkelTripel {
    fn default() -> Self {
        // φ₁ = acos(2/π)
        Self { cos_std: FRAC_2_PI }
    }
}

impl WinkelTripel {
    fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (ax, ay) = aitoff_xy(lat, lon);
        ((lon * self.cos_std + ax) / 2.0, (lat + ay) / 2.0)
    }
}

impl Projection for WinkelTripel {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        self.forward(lat, lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (w, h) = self.extent();
        if x.abs() > w / 2.0 || y.abs() > h / 2.0 {
            return NAN_PAIR;
        }
        let guess = hammer_seed(x, y, w / 2.0, h / 2.0);
        newton_inverse(|lat, lon| self.forward(lat, lon), x, y, guess)
    }

    fn extent(&self) -> (f64, f64) {
        (PI * self.cos_std + PI, PI)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VanDerGrinten;

fn grinten_xy(lat: f64, lon: f64) -> (f64, f64) {
    if lat == 0.0 {
        return (lon, 0.0);
    }
    let theta = (2.0 * lat.abs() / PI).min(1.0).asin();
    if lon == 0.0 || theta == FRAC_PI_2 {
        return (0.0, PI * (theta / 2.0).tan().copysign(lat));
    }

    let (sin_t, cos_t) = theta.sin_cos();
    let a = 0.5 * (PI / lon - lon / PI).abs();
    let g = cos_t / (sin_t + cos_t - 1.0);
    let p = g * (2.0 / sin_t - 1.0);
    let q = a * a + g;
    let p2 = p * p;
    let a2 = a * a;

    let x = PI * (a * (g - p2) + (a2 * (g - p2).powi(2) - (p2 + a2) * (g * g - p2)).max(0.0).sqrt())
        / (p2 + a2);
    let y = PI * (p * q - a * ((a2 + 1.0) * (p2 + a2) - q * q).max(0.0).sqrt()) / (p2 + a2);
    (x.copysign(lon), y.copysign(lat))
}

/// Algebraic (cubic) inverse, polished afterwards by Newton; it loses
/// precision close to the axes.
fn grinten_seed(x: f64, y: f64) -> (f64, f64) {
    let xx = x / PI;
    let yy = y / PI;
    if xx == 0.0 {
        let theta = 2.0 * yy.abs().atan();
        return ((FRAC_PI_2 * theta.sin()).copysign(y), 0.0);
    }
    if yy == 0.0 {
        return (0.0, x);
    }
    let r2 = xx * xx + yy * yy;
    let c1 = -yy.abs() * (1.0 + r2);
    let c2 = c1 - 2.0 * yy * yy + xx * xx;
    let c3 = -2.0 * c1 + 1.0 + 2.0 * yy * yy + r2 * r2;
    let d = yy * yy / c3 + (2.0 * c2.powi(3) / c3.powi(3) - 9.0 * c1 * c2 / (c3 * c3)) / 27.0;
    let a1 = (c1 - c2 * c2 / (3.0 * c3)) / c3;
    let m1 = 2.0 * (-a1 / 3.0).max(0.0).sqrt();
    let theta1 = (3.0 * d / (a1 * m1)).clamp(-1.0, 1.0).acos() / 3.0;
    let lat = PI * (-m1 * (theta1 + FRAC_PI_3).cos() - c2 / (3.0 * c3));
    let lon = PI * (r2 - 1.0 + (1.0 + 2.0 * (xx * xx - yy * yy) + r2 * r2).max(0.0).sqrt()) / (2.0 * xx);
    (lat.copysign(y).clamp(-FRAC_PI_2, FRAC_PI_2), lon)
}

impl Projection for VanDerGrinten {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if lat.abs() >= FRAC_PI_2 {
            return NAN_PAIR;
        }
        grinten_xy(lat, lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        if x.hypot(y) > PI {
            return NAN_PAIR;
        }
        newton_inverse(grinten_xy, x, y, grinten_seed(x, y))
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CASES: &[(f64, f64)] = &[
        (0.0, 0.0),
        (45.0, 10.0),
        (40.7484, -73.9857),
        (35.6895, 139.6917),
        (-60.0, 120.0),
        (20.0, -170.0),
    ];

    fn assert_round_trip(proj: &dyn Projection) {
        for &(lat_deg, lon_deg) in CASES {
            let lat = lat_deg.to_radians();
            let lon = lon_deg.to_radians();
            let (x, y) = proj.project(lat, lon);
            let (lat2, lon2) = proj.inverse(x, y);
            assert_relative_eq!(lat2, lat, epsilon = 1e-6);
            assert_relative_eq!(lon2, lon, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_roundtrips() {
        assert_round_trip(&Aitoff);
        assert_round_trip(&WinkelTripel::default());
        assert_round_trip(&VanDerGrinten);
    }

    #[test]
    fn test_aitoff_edges() {
        let (x, _) = Aitoff.project(0.0, PI);
        assert_relative_eq!(x, PI, epsilon = 1e-12);
        let (_, y) = Aitoff.project(FRAC_PI_2, 0.0);
        assert_relative_eq!(y, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_winkel_extent() {
        let proj = WinkelTripel::default();
        let (w, h) = proj.extent();
        let (x, _) = proj.project(0.0, PI);
        let (_, y) = proj.project(FRAC_PI_2, 0.0);
        assert_relative_eq!(x, w / 2.0, epsilon = 1e-12);
        assert_relative_eq!(y, h / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grinten_special_lines() {
        let (x, y) = VanDerGrinten.project(0.0, 1.0);
        assert_relative_eq!(x, 1.0);
        assert_eq!(y, 0.0);
        let (x, y) = VanDerGrinten.project(FRAC_PI_2 / 3.0, 0.0);
        assert_eq!(x, 0.0);
        assert!(y > 0.0);
        assert!(VanDerGrinten.project(FRAC_PI_2, 0.3).0.is_nan());
    }

    #[test]
    fn test_grinten_equator_edge_on_circle() {
        let (x, y) = VanDerGrinten.project(1e-9, PI);
        assert_relative_eq!(x.hypot(y), PI, epsilon = 1e-6);
    }
}
