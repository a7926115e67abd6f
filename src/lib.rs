pub mod affine;
pub mod config;
pub mod distortion;
pub mod error;
pub mod grid;
pub mod numeric;
pub mod proj;
pub mod rotation;
#[cfg(feature = "python")]
mod py;

pub use config::{DistortionConfig, SamplingConfig};
pub use distortion::{compute_distortion, compute_distortion_with_progress, DistortionMap};
pub use error::{GridError, MapError, ProjError};
pub use grid::{project_grid, sample_grid, Grid, Sampling};
pub use proj::{
    list_projections, ConfiguredProjection, ObliqueProjection, Projection, ProjectionInstance,
    ProjectionKind,
};
pub use rotation::{deobliquify, obliquify, Pole};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn map_projections(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    py::register(m)?;
    Ok(())
}
