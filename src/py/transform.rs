//! PyO3 bindings for batch point transformation.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::proj::Projection;
use crate::rotation::{obliquify_batch, Pole};

type ArrayPair<'py> = (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>);

fn zip_columns(a: &PyReadonlyArray1<'_, f64>, b: &PyReadonlyArray1<'_, f64>) -> PyResult<Vec<(f64, f64)>> {
    let a = a.as_array();
    let b = b.as_array();
    if a.len() != b.len() {
        return Err(PyValueError::new_err(format!(
            "coordinate arrays must have same length, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b.iter()).map(|(&u, &v)| (u, v)).collect())
}

fn unzip_columns(py: Python<'_>, coords: Vec<(f64, f64)>) -> ArrayPair<'_> {
    let (us, vs): (Vec<f64>, Vec<f64>) = coords.into_iter().unzip();
    (
        PyArray1::from_owned_array(py, ndarray::Array1::from(us)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(vs)),
    )
}

/// Project arrays of coordinates onto the plane.
///
/// Args:
///     lat: 1D array of latitudes in radians.
///     lon: 1D array of longitudes in radians.
///     projection: Projection name (e.g. "Mollweide").
///     params: Optional parameter list; defaults are used when omitted.
///     pole: Optional oblique pole (lat, lon, theta) in degrees.
///     inverse: Treat the inputs as (x, y) and return (lat, lon).
///
/// Returns:
///     Tuple of (x, y) arrays. Undefined points are NaN.
#[pyfunction]
#[pyo3(signature = (lat, lon, projection, params=None, pole=None, inverse=false))]
pub fn project_points<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    projection: &str,
    params: Option<Vec<f64>>,
    pole: Option<(f64, f64, f64)>,
    inverse: bool,
) -> PyResult<ArrayPair<'py>> {
    let mut coords = zip_columns(&lat, &lon)?;
    let proj = super::oblique_from_args(projection, params, pole)?;

    let coords = py.allow_threads(move || {
        if inverse {
            proj.inverse_batch(&mut coords);
        } else {
            proj.project_batch(&mut coords);
        }
        coords
    });
    Ok(unzip_columns(py, coords))
}

/// Rotate coordinates into the frame of an oblique pole.
///
/// Args:
///     lat, lon: 1D arrays in radians.
///     pole: (lat, lon, theta) of the new pole, in degrees.
#[pyfunction]
#[pyo3(signature = (lat, lon, pole))]
pub fn obliquify_points<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    pole: (f64, f64, f64),
) -> PyResult<ArrayPair<'py>> {
    let mut coords = zip_columns(&lat, &lon)?;
    let pole = Pole::from_degrees(pole.0, pole.1, pole.2);
    let coords = py.allow_threads(move || {
        obliquify_batch(&pole, &mut coords);
        coords
    });
    Ok(unzip_columns(py, coords))
}
