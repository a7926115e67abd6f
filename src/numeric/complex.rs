//! Minimal complex arithmetic for the elliptic projections.

use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

pub const I: Complex = Complex { re: 0.0, im: 1.0 };
pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn from_polar(r: f64, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(r * c, r * s)
    }

    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.re * k, self.im * k)
    }

    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Principal square root, with the cut along the negative real axis.
    pub fn sqrt(self) -> Self {
        let r = self.abs();
        if r == 0.0 {
            return Self::default();
        }
        let re = ((r + self.re) / 2.0).sqrt();
        let im = ((r - self.re) / 2.0).sqrt().copysign(self.im);
        Self::new(re, im)
    }

    /// Principal natural logarithm.
    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    pub fn exp(self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    pub fn powf(self, p: f64) -> Self {
        let r = self.abs();
        if r == 0.0 {
            return if p > 0.0 { Self::default() } else { Self::new(f64::NAN, f64::NAN) };
        }
        Self::from_polar(r.powf(p), self.arg() * p)
    }

    pub fn sin(self) -> Self {
        let (s, c) = self.re.sin_cos();
        Self::new(s * self.im.cosh(), c * self.im.sinh())
    }

    pub fn cos(self) -> Self {
        let (s, c) = self.re.sin_cos();
        Self::new(c * self.im.cosh(), -s * self.im.sinh())
    }

    /// Principal arc-cosine, `-i ln(z + i sqrt(1 - z^2))`.
    pub fn acos(self) -> Self {
        let root = (ONE - self * self).sqrt();
        -(I * (self + I * root).ln())
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let d = rhs.re * rhs.re + rhs.im * rhs.im;
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / d,
            (self.im * rhs.re - self.re * rhs.im) / d,
        )
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Complex, b: Complex) {
        assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
    }

    #[test]
    fn test_mul_div_inverse() {
        let a = Complex::new(1.5, -0.5);
        let b = Complex::new(-2.0, 3.0);
        assert_close((a * b) / b, a);
    }

    #[test]
    fn test_sqrt_negative_real() {
        assert_close(Complex::from(-4.0).sqrt(), Complex::new(0.0, 2.0));
    }

    #[test]
    fn test_exp_ln_round_trip() {
        let z = Complex::new(0.3, 2.0);
        assert_close(z.ln().exp(), z);
    }

    #[test]
    fn test_acos_real_axis() {
        assert_close(Complex::from(0.0).acos(), Complex::new(FRAC_PI_2, 0.0));
        assert_close(Complex::from(-1.0).acos(), Complex::new(PI, 0.0));
        let z = Complex::new(0.4, -0.7);
        assert_close(z.acos().cos(), z);
    }

    #[test]
    fn test_sin_cos_identity() {
        let z = Complex::new(0.7, 0.4);
        let s = z.sin();
        let c = z.cos();
        assert_close(s * s + c * c, ONE);
    }

    #[test]
    fn test_powf_matches_sqrt() {
        let z = Complex::new(3.0, 4.0);
        assert_close(z.powf(0.5), z.sqrt());
    }
}
