//! PyO3 binding for the distortion pass.

use numpy::PyArray2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::DistortionConfig;
use crate::distortion::compute_distortion;
use crate::error::MapError;
use crate::grid::{sample_grid, Sampling};

/// Areal and shape distortion of a projection over a sphere grid.
///
/// Args:
///     projection: Projection name.
///     params: Optional parameter list.
///     pole: Optional oblique pole (lat, lon, theta) in degrees.
///     sampling: "globe" (area-uniform, for statistics) or "regular".
///     resolution: Angular spacing in radians for "globe", column count
///         for "regular".
///     crop: Drop cells on the antimeridian (regular grids only).
///
/// Returns:
///     Tuple (areal, shape, nan_fraction); statistics should come from a
///     "globe" grid.
#[pyfunction]
#[pyo3(signature = (projection, params=None, pole=None, sampling="globe", resolution=0.01, crop=true))]
#[allow(clippy::type_complexity)]
pub fn distortion_map<'py>(
    py: Python<'py>,
    projection: &str,
    params: Option<Vec<f64>>,
    pole: Option<(f64, f64, f64)>,
    sampling: &str,
    resolution: f64,
    crop: bool,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>, f64)> {
    let sampling = match sampling {
        "globe" => Sampling::GlobeUniform {
            angular_resolution: resolution,
        },
        "regular" => Sampling::Regular {
            resolution: resolution as usize,
            crop_antimeridian: crop,
        },
        other => {
            return Err(PyValueError::new_err(format!(
                "Unknown sampling: {other}"
            )))
        }
    };
    let proj = super::oblique_from_args(projection, params, pole)?;

    let map = py.allow_threads(move || -> Result<_, MapError> {
        let grid = sample_grid(sampling)?;
        Ok(compute_distortion(&proj, &grid, &DistortionConfig::default()))
    })?;

    let nan_fraction = map.summary.nan_fraction();
    Ok((
        PyArray2::from_owned_array(py, map.areal),
        PyArray2::from_owned_array(py, map.shape),
        nan_fraction,
    ))
}
