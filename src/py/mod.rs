use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::{MapError, ProjError};
use crate::proj::{list_projections as descriptors, ObliqueProjection, ProjectionKind};
use crate::rotation::Pole;

mod analysis;
mod transform;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(list_projections, m)?)?;
    m.add_function(wrap_pyfunction!(transform::project_points, m)?)?;
    m.add_function(wrap_pyfunction!(transform::obliquify_points, m)?)?;
    m.add_function(wrap_pyfunction!(analysis::distortion_map, m)?)?;
    Ok(())
}

impl From<MapError> for PyErr {
    fn from(err: MapError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ProjError> for PyErr {
    fn from(err: ProjError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Look up a projection by display name and configure it, optionally with an
/// oblique pole given in degrees as (lat, lon, theta).
pub(crate) fn oblique_from_args(
    name: &str,
    params: Option<Vec<f64>>,
    pole: Option<(f64, f64, f64)>,
) -> Result<ObliqueProjection, ProjError> {
    let kind = ProjectionKind::from_name(name)?;
    let base = match params {
        Some(params) => kind.configure(&params)?,
        None => kind.configure_default(),
    };
    let pole = pole.map_or(Pole::NORTH, |(lat, lon, theta)| {
        Pole::from_degrees(lat, lon, theta)
    });
    Ok(ObliqueProjection::new(base, pole))
}

/// Metadata of every available projection, as a list of dicts.
#[pyfunction]
fn list_projections(py: Python<'_>) -> PyResult<Vec<Bound<'_, PyDict>>> {
    descriptors()
        .into_iter()
        .map(|d| {
            let dict = PyDict::new(py);
            dict.set_item("name", d.name)?;
            dict.set_item("description", d.description)?;
            dict.set_item("aspect_ratio", d.aspect_ratio)?;
            dict.set_item("width", d.width)?;
            dict.set_item("height", d.height)?;
            dict.set_item("category", format!("{:?}", d.category))?;
            dict.set_item("property", format!("{:?}", d.property))?;
            dict.set_item("topology", d.topology.bits())?;
            let params: Vec<(&str, f64, f64, f64)> = d
                .params
                .iter()
                .map(|p| (p.name, p.min, p.max, p.default))
                .collect();
            dict.set_item("params", params)?;
            Ok(dict)
        })
        .collect()
}
