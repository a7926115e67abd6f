//! Tobler hyperelliptical projection.
//!
//! Meridians follow the curve |x|ᴷ + |y|ᴷ = 1, blended with straight lines by
//! `alpha`. The row spacing that makes the map equal-area comes from an ODE
//! with no closed form, so it is tabulated once at construction:
//!
//!   h(y) = (1 − yᴷ)^(1/K)
//!   ε    = ∫₀¹ h(y) dy
//!   Z(y) = ∫₀ʸ (α + (1−α)·h(t)) / (α + (1−α)·ε) dt
//!
//! Z(y) equals sin(φ) at the row y; the table is inverted by binary search.

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Instant;

use crate::numeric::{integrate, lin_interp, solve_ode};
use crate::proj::common::NAN_PAIR;
use crate::proj::Projection;

/// Default number of table intervals.
pub const TABLE_SIZE: usize = 20_000;

#[derive(Debug, Clone)]
pub struct Tobler {
    alpha: f64,
    kappa: f64,
    /// Z(i/N) for i = 0..=N, non-decreasing, Z(0) = 0.
    table: Vec<f64>,
    /// Uniform scale that makes the local area factor exactly one.
    scale: f64,
}

impl Tobler {
    /// `alpha` in [0, 1], `kappa` (the superellipse exponent K) in [1, 5].
    pub fn new(alpha: f64, kappa: f64) -> Self {
        Self::with_resolution(alpha, kappa, TABLE_SIZE)
    }

    pub fn with_resolution(alpha: f64, kappa: f64, n: usize) -> Self {
        let started = Instant::now();
        let n = n.max(1);
        let step = 1.0 / n as f64;

        let epsilon = integrate(0.0, 1.0, |y| hyper_ellipse(y, kappa), step);
        let norm = alpha + (1.0 - alpha) * epsilon;
        let table = solve_ode(
            1.0,
            n,
            |y| (alpha + (1.0 - alpha) * hyper_ellipse(y, kappa)).abs() / norm,
            step,
        );
        let scale = 1.0 / (FRAC_PI_2 * norm).sqrt();

        log::debug!(
            "Tobler table built: alpha={alpha}, K={kappa}, {} samples in {:?}",
            table.len(),
            started.elapsed()
        );

        Self {
            alpha,
            kappa,
            table,
            scale,
        }
    }

    /// Plane window for the given parameters, without building the table.
    pub fn extent_for(alpha: f64, kappa: f64) -> (f64, f64) {
        let epsilon = integrate(0.0, 1.0, |y| hyper_ellipse(y, kappa), 1.0 / TABLE_SIZE as f64);
        let scale = 1.0 / (FRAC_PI_2 * (alpha + (1.0 - alpha) * epsilon)).sqrt();
        (2.0 * PI * scale, PI * scale)
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }

    fn intervals(&self) -> usize {
        self.table.len() - 1
    }

    /// Meridian width factor at normalised row `y`.
    #[inline]
    fn width(&self, y: f64) -> f64 {
        self.alpha + (1.0 - self.alpha) * hyper_ellipse(y, self.kappa)
    }

    /// Normalised row for `z = |sin φ|`.
    fn row_for(&self, z: f64) -> f64 {
        let n = self.intervals() as f64;
        let idx = self.table.partition_point(|&t| t < z);
        if idx >= self.table.len() {
            return 1.0;
        }
        if idx == 0 || self.table[idx] == z {
            return idx as f64 / n;
        }
        let i = idx as f64;
        lin_interp(z, self.table[idx - 1], self.table[idx], i - 1.0, i) / n
    }

    /// `|sin φ|` at normalised row `y`.
    fn sin_lat_at(&self, y: f64) -> f64 {
        let n = self.intervals();
        let f = y * n as f64;
        let i = (f.floor() as usize).min(n - 1);
        let t = f - i as f64;
        (self.table[i] + t * (self.table[i + 1] - self.table[i])).min(1.0)
    }
}

impl Default for Tobler {
    fn default() -> Self {
        Self::new(0.0, 2.5)
    }
}

/// Superellipse profile (1 − |y|ᴷ)^(1/K), clamped to [0, 1].
#[inline]
fn hyper_ellipse(y: f64, kappa: f64) -> f64 {
    (1.0 - y.abs().min(1.0).powf(kappa)).max(0.0).powf(1.0 / kappa)
}

impl Projection for Tobler {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if !lat.is_finite() || !lon.is_finite() {
            return NAN_PAIR;
        }
        let y = self.row_for(lat.sin().abs());
        (
            self.scale * lon * self.width(y),
            self.scale * FRAC_PI_2 * y * lat.signum(),
        )
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let row = y.abs() / (self.scale * FRAC_PI_2);
        if row > 1.0 + 1e-12 {
            return NAN_PAIR;
        }
        let row = row.min(1.0);
        let lat = self.sin_lat_at(row).asin().copysign(y);
        let width = self.scale * self.width(row);
        if width < 1e-15 {
            return if x.abs() < 1e-12 { (lat, 0.0) } else { NAN_PAIR };
        }
        (lat, x / width)
    }

    fn extent(&self) -> (f64, f64) {
        let w = 2.0 * PI * self.scale * self.width(0.0);
        (w, PI * self.scale)
    }
}
