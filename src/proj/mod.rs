pub mod azimuthal;
pub mod common;
pub mod compromise;
pub mod conic;
pub mod cylindrical;
pub mod pipeline;
pub mod pseudocylindrical;
pub mod quincuncial;
pub mod registry;
pub mod tobler;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ProjError;

pub use pipeline::ObliqueProjection;
pub use registry::{list_projections, ConfiguredProjection, ProjectionInstance, ProjectionKind};

/// Trait for sphere-to-plane projections on the unit sphere.
///
/// Points are `(lat, lon)` in radians. A point the projection cannot represent
/// comes back as a NaN pair; no per-point call ever fails with an error.
pub trait Projection: Send + Sync {
    /// Forward: (lat_rad, lon_rad) -> (x, y)
    fn project(&self, lat: f64, lon: f64) -> (f64, f64);

    /// Inverse: (x, y) -> (lat_rad, lon_rad)
    ///
    /// Longitudes are not wrapped. The bare projection structs may report
    /// `|lon| > pi` for plane points outside the map outline;
    /// [`ConfiguredProjection`] turns those into a NaN pair.
    fn inverse(&self, x: f64, y: f64) -> (f64, f64);

    /// Width and height of the plane window, centred on the origin, that
    /// holds the map.
    fn extent(&self) -> (f64, f64);

    /// Batch forward transform, in place.
    fn project_batch(&self, coords: &mut [(f64, f64)]) {
        for c in coords.iter_mut() {
            *c = self.project(c.0, c.1);
        }
    }

    /// Batch inverse transform, in place.
    fn inverse_batch(&self, coords: &mut [(f64, f64)]) {
        for c in coords.iter_mut() {
            *c = self.inverse(c.0, c.1);
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Topology: u8 {
        /// The whole globe fits inside `extent()`.
        const BOUNDED = 0b0000_0001;
        /// The plane repeats in longitude; the antimeridian is a cut.
        const WRAPS_ANTIMERIDIAN = 0b0000_0010;
        /// A pole (or the antipode of the centre) is a line or is undefined.
        const POLE_SINGULARITY = 0b0000_0100;
        /// A seam runs through the interior of the map.
        const INTERRUPTED = 0b0000_1000;
        /// Only part of the globe is drawn.
        const PARTIAL = 0b0001_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Cylindrical,
    Azimuthal,
    Conic,
    Pseudocylindrical,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    Conformal,
    EqualArea,
    Equidistant,
    Compromise,
    Perspective,
}

/// A tunable projection parameter. Values are given in the parameter's
/// natural unit (degrees for parallels).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamSpec {
    pub const fn new(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn validate(&self, value: f64) -> Result<(), ProjError> {
        let reason = if !value.is_finite() {
            format!("{value} is not finite")
        } else if value < self.min {
            format!("{value} is below the minimum {}", self.min)
        } else if value > self.max {
            format!("{value} is above the maximum {}", self.max)
        } else {
            return Ok(());
        };
        Err(ProjError::InvalidParameter {
            name: self.name.to_string(),
            reason,
        })
    }
}

/// Immutable metadata for one projection variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Width / height of the map at the default parameters.
    pub aspect_ratio: f64,
    /// Plane window at the default parameters, as in [`Projection::extent`].
    pub width: f64,
    pub height: f64,
    pub topology: Topology,
    pub category: Category,
    pub property: Property,
    pub params: Vec<ParamSpec>,
}

impl ProjectionDescriptor {
    pub fn defaults(&self) -> Vec<f64> {
        self.params.iter().map(|p| p.default).collect()
    }

    pub fn has_parameters(&self) -> bool {
        !self.params.is_empty()
    }
}
