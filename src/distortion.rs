//! Tissot-style distortion analysis.
//!
//! At each sample the Jacobian of `project` is estimated by central
//! differences, with the longitude column divided by `cos(lat)` so that it
//! measures stretch against true distance on the sphere. From that corrected
//! matrix `M`:
//!
//!   areal = ln |det M|        zero for an equal-area map
//!   shape = ln (σ₁ / σ₂)      zero for a conformal map, never negative
//!
//! Cells whose stencil crosses a pole, a seam or an undefined point are NaN
//! and are left out of every aggregate.

use std::f64::consts::{FRAC_PI_2, LN_10};
use std::ops::ControlFlow;

use ndarray::{Array2, Zip};

use crate::config::{DistortionConfig, SamplingConfig};
use crate::error::MapError;
use crate::grid::{globe_uniform_grid, map_image_grid, Grid};
use crate::proj::{ObliqueProjection, Projection};

/// Areal and shape distortion at one point, with finite-difference step `h`
/// in radians. Either value NaN means the point is unusable.
pub fn distortion_at<P>(proj: &P, lat: f64, lon: f64, h: f64, seam_ratio: f64) -> (f64, f64)
where
    P: Projection + ?Sized,
{
    const UNDEFINED: (f64, f64) = (f64::NAN, f64::NAN);

    if !(h > 0.0) || lat - h < -FRAC_PI_2 || lat + h > FRAC_PI_2 {
        return UNDEFINED;
    }
    let cos_lat = lat.cos();
    if !(cos_lat > 0.0) {
        return UNDEFINED;
    }

    let centre = proj.project(lat, lon);
    let north = proj.project(lat + h, lon);
    let south = proj.project(lat - h, lon);
    let east = proj.project(lat, lon + h);
    let west = proj.project(lat, lon - h);

    if straddles(centre, north, south, seam_ratio) || straddles(centre, east, west, seam_ratio) {
        return UNDEFINED;
    }

    let a = (north.0 - south.0) / (2.0 * h);
    let c = (north.1 - south.1) / (2.0 * h);
    let b = (east.0 - west.0) / (2.0 * h * cos_lat);
    let d = (east.1 - west.1) / (2.0 * h * cos_lat);

    let (s1, s2) = singular_values(a, b, c, d);
    let areal = (a * d - b * c).abs().ln();
    let shape = (s1 / s2).ln();
    if areal.is_finite() && shape.is_finite() {
        (areal, shape.max(0.0))
    } else {
        UNDEFINED
    }
}

/// True when the two arms of a stencil through `centre` cannot belong to one
/// smooth patch of the map: a point is undefined, or one arm moves more than
/// `ratio` times further than the other.
fn straddles(centre: (f64, f64), fwd: (f64, f64), bwd: (f64, f64), ratio: f64) -> bool {
    let finite = |p: (f64, f64)| p.0.is_finite() && p.1.is_finite();
    if !(finite(centre) && finite(fwd) && finite(bwd)) {
        return true;
    }
    let f = (fwd.0 - centre.0).hypot(fwd.1 - centre.1);
    let b = (centre.0 - bwd.0).hypot(centre.1 - bwd.1);
    let (lo, hi) = if f < b { (f, b) } else { (b, f) };
    hi > ratio * lo
}

/// Singular values σ₁ ≥ σ₂ of [[a, b], [c, d]].
#[inline]
fn singular_values(a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    let q = ((a + d) / 2.0).hypot((c - b) / 2.0);
    let r = ((a - d) / 2.0).hypot((c + b) / 2.0);
    (q + r, (q - r).abs())
}

/// Mean and population standard deviation over the finite values of a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
}

impl Stats {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (mut n, mut sum, mut sum_sq) = (0usize, 0.0, 0.0);
        for &v in values {
            if v.is_finite() {
                n += 1;
                sum += v;
                sum_sq += v * v;
            }
        }
        if n == 0 {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        let mean = sum / n as f64;
        let var = (sum_sq / n as f64 - mean * mean).max(0.0);
        Self {
            mean,
            std_dev: var.sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionSummary {
    pub areal: Stats,
    pub shape: Stats,
    /// Cells where both measures are defined.
    pub valid: usize,
    pub total: usize,
}

impl DistortionSummary {
    fn from_maps(areal: &Array2<f64>, shape: &Array2<f64>) -> Self {
        let valid = Zip::from(areal)
            .and(shape)
            .fold(0, |n, a, s| n + usize::from(a.is_finite() && s.is_finite()));
        Self {
            areal: Stats::from_values(areal),
            shape: Stats::from_values(shape),
            valid,
            total: areal.len(),
        }
    }

    /// Fraction of cells with no usable distortion value.
    pub fn nan_fraction(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        1.0 - self.valid as f64 / self.total as f64
    }

    /// Spread of the area scale, in decibels.
    pub fn size_db(&self) -> f64 {
        self.areal.std_dev / LN_10 * 10.0
    }

    /// Average shape distortion, in decibels.
    pub fn shape_db(&self) -> f64 {
        self.shape.mean / LN_10 * 10.0
    }
}

#[derive(Debug, Clone)]
pub struct DistortionMap {
    pub areal: Array2<f64>,
    pub shape: Array2<f64>,
    pub summary: DistortionSummary,
    /// Rows evaluated before the pass finished or was stopped.
    pub completed_rows: usize,
}

impl DistortionMap {
    pub fn is_complete(&self) -> bool {
        self.completed_rows == self.areal.nrows()
    }
}

#[inline]
fn cell<P>(proj: &P, grid: &Grid, lat: f64, lon: f64, h: f64, seam_ratio: f64) -> (f64, f64)
where
    P: Projection + ?Sized,
{
    if lat.is_nan() || lon.is_nan() || grid.crosses_seam(lon, h) {
        return (f64::NAN, f64::NAN);
    }
    distortion_at(proj, lat, lon, h, seam_ratio)
}

fn warn_if_broken(summary: &DistortionSummary, config: &DistortionConfig) {
    let nan_fraction = summary.nan_fraction();
    if nan_fraction > config.nan_warn_fraction {
        log::warn!(
            "{:.1}% of {} cells have no defined distortion",
            nan_fraction * 100.0,
            summary.total
        );
    }
}

/// Distortion of every cell of `grid`, evaluated in parallel.
pub fn compute_distortion<P>(proj: &P, grid: &Grid, config: &DistortionConfig) -> DistortionMap
where
    P: Projection + ?Sized,
{
    let h = config.step_fraction * grid.spacing;
    let dim = grid.shape();
    let mut areal = Array2::from_elem(dim, f64::NAN);
    let mut shape = Array2::from_elem(dim, f64::NAN);

    Zip::from(&mut areal)
        .and(&mut shape)
        .and(&grid.lat)
        .and(&grid.lon)
        .par_for_each(|a, s, &lat, &lon| {
            (*a, *s) = cell(proj, grid, lat, lon, h, config.seam_ratio);
        });

    let summary = DistortionSummary::from_maps(&areal, &shape);
    warn_if_broken(&summary, config);
    DistortionMap {
        areal,
        shape,
        summary,
        completed_rows: dim.0,
    }
}

/// Like [`compute_distortion`], but one row at a time, calling
/// `progress(rows_done, rows_total)` after each row. Returning
/// `ControlFlow::Break` stops the pass; rows not reached stay NaN.
pub fn compute_distortion_with_progress<P, F>(
    proj: &P,
    grid: &Grid,
    config: &DistortionConfig,
    mut progress: F,
) -> DistortionMap
where
    P: Projection + ?Sized,
    F: FnMut(usize, usize) -> ControlFlow<()>,
{
    let h = config.step_fraction * grid.spacing;
    let dim = grid.shape();
    let rows = dim.0;
    let mut areal = Array2::from_elem(dim, f64::NAN);
    let mut shape = Array2::from_elem(dim, f64::NAN);

    let mut completed_rows = 0;
    for r in 0..rows {
        Zip::from(areal.row_mut(r))
            .and(shape.row_mut(r))
            .and(grid.lat.row(r))
            .and(grid.lon.row(r))
            .par_for_each(|a, s, &lat, &lon| {
                (*a, *s) = cell(proj, grid, lat, lon, h, config.seam_ratio);
            });
        completed_rows = r + 1;
        if progress(completed_rows, rows).is_break() {
            log::info!("Distortion pass stopped after {completed_rows} of {rows} rows");
            break;
        }
    }

    let summary = DistortionSummary::from_maps(&areal, &shape);
    if completed_rows == rows {
        warn_if_broken(&summary, config);
    }
    DistortionMap {
        areal,
        shape,
        summary,
        completed_rows,
    }
}

/// Share of finite samples per bin, in percent.
///
/// Bin `i` is centred on `min + i * (max - min) / bins` for `i = 0..=bins`;
/// samples outside `[min, max]` count toward the total but fall in no bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub percent: Vec<f64>,
    /// Number of finite samples seen.
    pub total: usize,
}

impl Histogram {
    pub fn from_values<'a, I>(values: I, min: f64, max: f64, bins: usize) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let bins = bins.max(1);
        let mut counts = vec![0usize; bins + 1];
        let mut total = 0;
        for &v in values {
            if !v.is_finite() {
                continue;
            }
            total += 1;
            let i = ((v - min) / (max - min) * bins as f64).round();
            if i >= 0.0 && i <= bins as f64 {
                counts[i as usize] += 1;
            }
        }
        let percent = counts
            .into_iter()
            .map(|c| {
                if total == 0 {
                    0.0
                } else {
                    100.0 * c as f64 / total as f64
                }
            })
            .collect();
        Self {
            min,
            max,
            percent,
            total,
        }
    }

    /// Centre value of each bin.
    pub fn centers(&self) -> Vec<f64> {
        let bins = self.percent.len() - 1;
        (0..=bins)
            .map(|i| self.min + i as f64 * (self.max - self.min) / bins as f64)
            .collect()
    }
}

/// The two passes of a map analysis: a preview-resolution picture of the
/// map itself, and the area-fair statistics over the globe.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub map: DistortionMap,
    pub globe: DistortionMap,
}

impl Analysis {
    /// Areal distortion histogram over ±1 decade, 20 bins.
    pub fn size_histogram(&self) -> Histogram {
        Histogram::from_values(&self.globe.areal, -LN_10, LN_10, 20)
    }

    /// Shape distortion histogram over one decade, 20 bins.
    pub fn shape_histogram(&self) -> Histogram {
        Histogram::from_values(&self.globe.shape, 0.0, LN_10, 20)
    }

    /// Redo the map pass at `fine_resolution`. The globe statistics do not
    /// depend on the map resolution and are kept.
    pub fn refine(
        &mut self,
        proj: &ObliqueProjection,
        sampling: &SamplingConfig,
        config: &DistortionConfig,
    ) -> Result<(), MapError> {
        sampling.validate()?;
        config.validate()?;
        self.map = map_pass(proj, sampling.fine_resolution, sampling.crop_antimeridian, config)?;
        Ok(())
    }
}

/// Distortion over the pixels of a `resolution`-wide image of the map.
pub fn map_pass(
    proj: &ObliqueProjection,
    resolution: usize,
    crop: bool,
    config: &DistortionConfig,
) -> Result<DistortionMap, MapError> {
    let grid = map_image_grid(proj, resolution, crop)?;
    Ok(compute_distortion(proj, &grid, config))
}

pub fn analyze(
    proj: &ObliqueProjection,
    sampling: &SamplingConfig,
    config: &DistortionConfig,
) -> Result<Analysis, MapError> {
    sampling.validate()?;
    config.validate()?;

    let map = map_pass(proj, sampling.rough_resolution, sampling.crop_antimeridian, config)?;

    let globe_grid = globe_uniform_grid(sampling.globe_resolution)?;
    let globe = compute_distortion(proj, &globe_grid, config);

    log::debug!(
        "{:?}: size {:.2} dB, shape {:.2} dB",
        proj.base().kind(),
        globe.summary.size_db(),
        globe.summary.shape_db()
    );
    Ok(Analysis { map, globe })
}
