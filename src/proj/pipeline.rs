//! A configured projection viewed through an oblique aspect.
//!
//! Forward: standard (lat, lon) → oblique frame → plane.
//! Inverse: plane → oblique frame → standard (lat, lon).

use crate::proj::registry::ConfiguredProjection;
use crate::proj::Projection;
use crate::rotation::{deobliquify, obliquify, Pole};

/// A configured projection with its pole moved to `pole`.
#[derive(Clone)]
pub struct ObliqueProjection {
    base: ConfiguredProjection,
    pole: Pole,
}

impl ObliqueProjection {
    pub fn new(base: ConfiguredProjection, pole: Pole) -> Self {
        Self { base, pole }
    }

    pub fn base(&self) -> &ConfiguredProjection {
        &self.base
    }

    pub fn pole(&self) -> &Pole {
        &self.pole
    }

    /// Inverse into the oblique frame, without the rotation back.
    ///
    /// Longitudes are left unwrapped so that callers can tell points past the
    /// antimeridian apart from points on the map.
    pub fn inverse_oblique(&self, x: f64, y: f64) -> (f64, f64) {
        self.base.inverse_unwrapped(x, y)
    }
}

impl Projection for ObliqueProjection {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if !lat.is_finite() || !lon.is_finite() {
            return (f64::NAN, f64::NAN);
        }
        let (lat1, lon1) = obliquify(&self.pole, (lat, lon));
        self.base.project(lat1, lon1)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        deobliquify(&self.pole, self.base.inverse(x, y))
    }

    fn extent(&self) -> (f64, f64) {
        self.base.extent()
    }
}

impl std::fmt::Debug for ObliqueProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObliqueProjection")
            .field("base", &self.base.kind())
            .field("pole", &self.pole)
            .finish()
    }
}
