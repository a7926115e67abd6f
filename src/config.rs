//! Sampling and distortion settings supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Resolutions for the three kinds of sampling pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Columns of the quick preview grid.
    /// Default: 500.
    pub rough_resolution: usize,

    /// Columns of the full-quality grid.
    /// Default: 2048.
    pub fine_resolution: usize,

    /// Angular spacing, in radians, of the area-uniform statistics grid.
    /// Default: 0.01.
    pub globe_resolution: f64,

    /// Drop samples whose stencil crosses the antimeridian.
    /// Default: true.
    pub crop_antimeridian: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rough_resolution: 500,
            fine_resolution: 2048,
            globe_resolution: 0.01,
            crop_antimeridian: true,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rough_resolution < 2 || self.fine_resolution < 2 {
            return Err(GridError::InvalidConfig(format!(
                "resolutions must be >= 2, got {} and {}",
                self.rough_resolution, self.fine_resolution
            )));
        }
        if !(self.globe_resolution > 0.0 && self.globe_resolution <= 1.0) {
            return Err(GridError::InvalidConfig(format!(
                "globe_resolution must be in (0, 1], got {}",
                self.globe_resolution
            )));
        }
        Ok(())
    }
}

/// Settings of the finite-difference distortion pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionConfig {
    /// Finite-difference step as a fraction of the grid spacing.
    /// Default: 0.25.
    pub step_fraction: f64,

    /// A stencil whose longer arm moves this many times further than its
    /// shorter arm is treated as crossing a seam.
    /// Default: 16.
    pub seam_ratio: f64,

    /// Warn when more than this fraction of cells is undefined.
    /// Default: 0.5.
    pub nan_warn_fraction: f64,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            step_fraction: 0.25,
            seam_ratio: 16.0,
            nan_warn_fraction: 0.5,
        }
    }
}

impl DistortionConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.step_fraction > 0.0 && self.step_fraction <= 1.0) {
            return Err(GridError::InvalidConfig(format!(
                "step_fraction must be in (0, 1], got {}",
                self.step_fraction
            )));
        }
        if !(self.seam_ratio > 1.0) {
            return Err(GridError::InvalidConfig(format!(
                "seam_ratio must be > 1, got {}",
                self.seam_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.nan_warn_fraction) {
            return Err(GridError::InvalidConfig(format!(
                "nan_warn_fraction must be in [0, 1], got {}",
                self.nan_warn_fraction
            )));
        }
        Ok(())
    }
}
