//! Conformal square maps built on the elliptic integral of the first kind
//! with modulus k = 1/√2.
//!
//! The northern hemisphere goes to a diamond with vertices (±K, 0), (0, ±K):
//!
//!   w = tan(π/4 − φ/2)·e^(iλ)
//!   z = i·(F(acos w | k) − K)
//!
//! with K = F(π/2 | k) ≈ 1.854. The north pole sits at the origin and the
//! equator runs along the diamond's edges.
//!
//! The series converges slowly near the vertices at λ = ±90°, so both
//! directions work in the quarter |λ| ≤ 45° and turn the result by a
//! multiple of 90°; the map is symmetric under that turn. The southern hemisphere is the
//! mirror image across the equator: Peirce folds it into the four corners of
//! the enclosing square, Guyou lays it out as a second square beside the
//! first.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use crate::numeric::complex::{I, ONE};
use crate::numeric::elliptic::complete_k;
use crate::numeric::{elliptic_f, newton_raphson_2d, Complex};
use crate::proj::common::NAN_PAIR;
use crate::proj::Projection;
use crate::rotation::normalize_lon;

const MODULUS: f64 = FRAC_1_SQRT_2;

/// Magnitude beyond which a series result is treated as divergent.
const BLOWUP: f64 = 10.0;

const INVERSE_TOLERANCE: f64 = 1e-10;

/// `i^m`, exact for every integer `m`.
fn quarter_turn(m: i32) -> Complex {
    match m.rem_euclid(4) {
        0 => ONE,
        1 => I,
        2 => -ONE,
        _ => -I,
    }
}

/// The hemisphere-to-diamond map shared by both layouts.
#[derive(Debug, Clone, Copy)]
struct Diamond {
    big_k: f64,
}

impl Diamond {
    fn new() -> Self {
        Self {
            big_k: complete_k(MODULUS),
        }
    }

    /// Forward map of a northern-hemisphere point.
    fn forward(&self, lat: f64, lon: f64) -> Complex {
        let m = (lon / FRAC_PI_2).round();
        self.forward_quarter(lat, lon - m * FRAC_PI_2) * quarter_turn(m as i32)
    }

    /// Forward map for |lon| ≤ π/4.
    fn forward_quarter(&self, lat: f64, lon: f64) -> Complex {
        let w = Complex::from_polar((FRAC_PI_4 - lat / 2.0).tan(), lon);
        let z = I * (elliptic_f(w.acos(), MODULUS) - Complex::from(self.big_k));
        if !z.is_finite() || z.abs() > BLOWUP {
            return Complex::default();
        }
        z
    }

    /// Inverse of [`Diamond::forward`].
    fn inverse(&self, z: Complex) -> (f64, f64) {
        // the prime meridian leaves the origin along arg z = -π/2
        let m = if z.abs() == 0.0 {
            0
        } else {
            ((z * I).arg() / FRAC_PI_2).round() as i32
        };
        let (lat, lon) = self.inverse_quarter(z * quarter_turn(-m));
        (lat, normalize_lon(lon + m as f64 * FRAC_PI_2))
    }

    /// Inverse of [`Diamond::forward_quarter`] by complex Newton iteration.
    fn inverse_quarter(&self, z: Complex) -> (f64, f64) {
        // undo the quarter turn: F(u) = -i·z + K
        let target = Complex::new(z.im, -z.re) + Complex::from(self.big_k);
        let guess = target.scale(FRAC_PI_2 / self.big_k);

        let series = |re: f64, im: f64| {
            let v = elliptic_f(Complex::new(re, im), MODULUS);
            (v.re, v.im)
        };
        // F'(u) = (1 - k² sin²u)^(-1/2); Cauchy–Riemann gives the Jacobian
        let jacobian = |re: f64, im: f64| {
            let s = Complex::new(re, im).sin();
            let d = Complex::from(1.0) / (Complex::from(1.0) - (s * s).scale(MODULUS * MODULUS)).sqrt();
            [[d.re, -d.im], [d.im, d.re]]
        };

        match newton_raphson_2d(
            (target.re, target.im),
            (guess.re, guess.im),
            series,
            jacobian,
            INVERSE_TOLERANCE,
        ) {
            Some((re, im)) => {
                let w = Complex::new(re, im).cos();
                (FRAC_PI_2 - 2.0 * w.abs().atan(), w.arg())
            }
            None => NAN_PAIR,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x.abs() + y.abs() <= self.big_k
    }

    /// Mirror a point across the diamond edge of its quadrant.
    fn reflect(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = if x >= 0.0 { 1.0 } else { -1.0 };
        let sy = if y >= 0.0 { 1.0 } else { -1.0 };
        let t = sx * x + sy * y - self.big_k;
        (x - t * sx, y - t * sy)
    }
}

/// Peirce quincuncial: the whole globe in a square, south pole at the corners.
#[derive(Debug, Clone, Copy)]
pub struct PeirceQuincuncial {
    diamond: Diamond,
}

impl PeirceQuincuncial {
    pub fn new() -> Self {
        Self {
            diamond: Diamond::new(),
        }
    }

    /// Half the side of the square, K(1/√2).
    pub fn half_side(&self) -> f64 {
        self.diamond.big_k
    }
}

impl Default for PeirceQuincuncial {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for PeirceQuincuncial {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if !lat.is_finite() || !lon.is_finite() {
            return NAN_PAIR;
        }
        if lat >= 0.0 {
            let z = self.diamond.forward(lat, lon);
            (z.re, z.im)
        } else {
            let z = self.diamond.forward(-lat, lon);
            self.diamond.reflect(z.re, z.im)
        }
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let k = self.diamond.big_k;
        if !(x.abs() <= k && y.abs() <= k) {
            return NAN_PAIR;
        }
        if self.diamond.contains(x, y) {
            self.diamond.inverse(Complex::new(x, y))
        } else {
            let (rx, ry) = self.diamond.reflect(x, y);
            let (lat, lon) = self.diamond.inverse(Complex::new(rx, ry));
            (-lat, lon)
        }
    }

    fn extent(&self) -> (f64, f64) {
        let side = 2.0 * self.diamond.big_k;
        (side, side)
    }
}

/// Guyou: the two hemispheres as squares side by side, north on the left.
#[derive(Debug, Clone, Copy)]
pub struct Guyou {
    diamond: Diamond,
}

impl Guyou {
    pub fn new() -> Self {
        Self {
            diamond: Diamond::new(),
        }
    }

    /// Half the side of each hemisphere square.
    fn half_side(&self) -> f64 {
        self.diamond.big_k * FRAC_1_SQRT_2
    }
}

impl Default for Guyou {
    fn default() -> Self {
        Self::new()
    }
}

/// e^(-iπ/4): turns the diamond into an upright square.
const TURN: Complex = Complex::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);

impl Projection for Guyou {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if !lat.is_finite() || !lon.is_finite() {
            return NAN_PAIR;
        }
        let h = self.half_side();
        let q = self.diamond.forward(lat.abs(), lon) * TURN;
        if lat >= 0.0 {
            (q.re - h, q.im)
        } else {
            (h - q.re, q.im)
        }
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let h = self.half_side();
        if !(x.abs() <= 2.0 * h && y.abs() <= h) {
            return NAN_PAIR;
        }
        let (qx, south) = if x <= 0.0 { (x + h, false) } else { (h - x, true) };
        let z = Complex::new(qx, y) * TURN.conj();
        let (lat, lon) = self.diamond.inverse(z);
        if south {
            (-lat, lon)
        } else {
            (lat, lon)
        }
    }

    fn extent(&self) -> (f64, f64) {
        (4.0 * self.half_side(), 2.0 * self.half_side())
    }
}
