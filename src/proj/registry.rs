//! Registry of every projection variant and their configuration lifecycle.
//!
//! `ProjectionKind` is the closed set of variants. Each kind maps to an
//! immutable [`ProjectionDescriptor`] and to a constructor; together they are
//! the dispatch table behind [`ProjectionKind::configure`].

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::proj::azimuthal::{
    AzimuthalEquidistant, Gnomonic, LambertAzimuthal, Magnifier, Orthographic, Stereographic,
};
use crate::proj::common::NAN_PAIR;
use crate::proj::compromise::{Aitoff, VanDerGrinten, WinkelTripel};
use crate::proj::conic::LambertConformalConic;
use crate::proj::cylindrical::{CylindricalEqualArea, Equirectangular, GallStereographic, Mercator};
use crate::proj::pseudocylindrical::{Hammer, Mollweide, Sinusoidal};
use crate::proj::quincuncial::{Guyou, PeirceQuincuncial};
use crate::proj::tobler::Tobler;
use crate::proj::{Category, ParamSpec, Projection, ProjectionDescriptor, Property, Topology};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionKind {
    Equirectangular,
    Mercator,
    GallStereographic,
    CylindricalEqualArea,
    AzimuthalEquidistant,
    Stereographic,
    LambertAzimuthal,
    Orthographic,
    Gnomonic,
    LambertConic,
    Sinusoidal,
    Mollweide,
    Hammer,
    Aitoff,
    WinkelTripel,
    VanDerGrinten,
    Magnifier,
    PeirceQuincuncial,
    Guyou,
    Tobler,
}

const CYLINDER: Topology = Topology::BOUNDED
    .union(Topology::WRAPS_ANTIMERIDIAN)
    .union(Topology::POLE_SINGULARITY);
const WORLD_OVAL: Topology = Topology::BOUNDED.union(Topology::WRAPS_ANTIMERIDIAN);

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 20] = [
        ProjectionKind::Equirectangular,
        ProjectionKind::Mercator,
        ProjectionKind::GallStereographic,
        ProjectionKind::CylindricalEqualArea,
        ProjectionKind::AzimuthalEquidistant,
        ProjectionKind::Stereographic,
        ProjectionKind::LambertAzimuthal,
        ProjectionKind::Orthographic,
        ProjectionKind::Gnomonic,
        ProjectionKind::LambertConic,
        ProjectionKind::Sinusoidal,
        ProjectionKind::Mollweide,
        ProjectionKind::Hammer,
        ProjectionKind::Aitoff,
        ProjectionKind::WinkelTripel,
        ProjectionKind::VanDerGrinten,
        ProjectionKind::Magnifier,
        ProjectionKind::PeirceQuincuncial,
        ProjectionKind::Guyou,
        ProjectionKind::Tobler,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "Equirectangular",
            ProjectionKind::Mercator => "Mercator",
            ProjectionKind::GallStereographic => "Gall Stereographic",
            ProjectionKind::CylindricalEqualArea => "Cylindrical Equal-Area",
            ProjectionKind::AzimuthalEquidistant => "Polar",
            ProjectionKind::Stereographic => "Stereographic",
            ProjectionKind::LambertAzimuthal => "Azimuthal Equal-Area",
            ProjectionKind::Orthographic => "Orthographic",
            ProjectionKind::Gnomonic => "Gnomonic",
            ProjectionKind::LambertConic => "Lambert Conical",
            ProjectionKind::Sinusoidal => "Sinusoidal",
            ProjectionKind::Mollweide => "Mollweide",
            ProjectionKind::Hammer => "Hammer",
            ProjectionKind::Aitoff => "Aitoff",
            ProjectionKind::WinkelTripel => "Winkel Tripel",
            ProjectionKind::VanDerGrinten => "Van der Grinten",
            ProjectionKind::Magnifier => "Magnifier",
            ProjectionKind::PeirceQuincuncial => "Peirce Quincuncial",
            ProjectionKind::Guyou => "Guyou",
            ProjectionKind::Tobler => "Tobler Hyperelliptical",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Result<Self, ProjError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProjError::UnknownProjection(name.to_string()))
    }

    fn description(self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "An equidistant cylindrical map",
            ProjectionKind::Mercator => "A conformal cylindrical map",
            ProjectionKind::GallStereographic => "A compromising cylindrical map",
            ProjectionKind::CylindricalEqualArea => "An equal-area cylindrical map",
            ProjectionKind::AzimuthalEquidistant => "An equidistant azimuthal map",
            ProjectionKind::Stereographic => "A conformal azimuthal map",
            ProjectionKind::LambertAzimuthal => "An equal-area azimuthal map",
            ProjectionKind::Orthographic => "Represents earth viewed from an infinite distance",
            ProjectionKind::Gnomonic => {
                "Every straight line on the map is a straight line on the sphere"
            }
            ProjectionKind::LambertConic => "A conformal conical map",
            ProjectionKind::Sinusoidal => "An equal-area map shaped like a sinusoid",
            ProjectionKind::Mollweide => "An equal-area map shaped like an ellipse",
            ProjectionKind::Hammer => "An equal-area map shaped like an ellipse, built from an azimuthal map",
            ProjectionKind::Aitoff => "A compromise map shaped like an ellipse",
            ProjectionKind::WinkelTripel => "The compromise map used by National Geographic",
            ProjectionKind::VanDerGrinten => "A circular compromise map",
            ProjectionKind::Magnifier => "A novelty map that swells the center to disproportionate scale",
            ProjectionKind::PeirceQuincuncial => "A conformal square map that uses complex math",
            ProjectionKind::Guyou => "A conformal map of the two hemispheres as side-by-side squares",
            ProjectionKind::Tobler => {
                "An equal-area map shaped like a hyperellipse, tuned by two parameters"
            }
        }
    }

    fn category(self) -> Category {
        use ProjectionKind::*;
        match self {
            Equirectangular | Mercator | GallStereographic | CylindricalEqualArea => {
                Category::Cylindrical
            }
            AzimuthalEquidistant | Stereographic | LambertAzimuthal | Orthographic | Gnomonic
            | Magnifier => Category::Azimuthal,
            LambertConic => Category::Conic,
            Sinusoidal | Mollweide | Tobler => Category::Pseudocylindrical,
            Hammer | Aitoff | WinkelTripel | VanDerGrinten | PeirceQuincuncial | Guyou => {
                Category::Other
            }
        }
    }

    fn property(self) -> Property {
        use ProjectionKind::*;
        match self {
            Mercator | Stereographic | LambertConic | PeirceQuincuncial | Guyou => {
                Property::Conformal
            }
            CylindricalEqualArea | LambertAzimuthal | Sinusoidal | Mollweide | Hammer | Tobler => {
                Property::EqualArea
            }
            Equirectangular | AzimuthalEquidistant => Property::Equidistant,
            Orthographic | Gnomonic => Property::Perspective,
            GallStereographic | Aitoff | WinkelTripel | VanDerGrinten | Magnifier => {
                Property::Compromise
            }
        }
    }

    fn topology(self) -> Topology {
        use ProjectionKind::*;
        match self {
            Equirectangular | GallStereographic | CylindricalEqualArea | WinkelTripel
            | VanDerGrinten | Tobler => CYLINDER,
            Mercator | LambertConic => Topology::WRAPS_ANTIMERIDIAN | Topology::POLE_SINGULARITY,
            Sinusoidal | Mollweide | Hammer | Aitoff => WORLD_OVAL,
            AzimuthalEquidistant | LambertAzimuthal | Magnifier => {
                Topology::BOUNDED | Topology::POLE_SINGULARITY
            }
            Stereographic => Topology::POLE_SINGULARITY | Topology::PARTIAL,
            Orthographic => Topology::BOUNDED | Topology::PARTIAL,
            Gnomonic => Topology::PARTIAL,
            PeirceQuincuncial => {
                Topology::BOUNDED | Topology::INTERRUPTED | Topology::POLE_SINGULARITY
            }
            Guyou => Topology::BOUNDED | Topology::INTERRUPTED,
        }
    }

    fn params(self) -> Vec<ParamSpec> {
        match self {
            ProjectionKind::CylindricalEqualArea => {
                vec![ParamSpec::new("Std. parallel", 0.0, 89.0, 30.0)]
            }
            ProjectionKind::LambertConic => vec![ParamSpec::new("Std. parallel", 1.0, 89.0, 45.0)],
            ProjectionKind::Tobler => vec![
                ParamSpec::new("alpha", 0.0, 1.0, 0.0),
                ParamSpec::new("K", 1.0, 5.0, 2.5),
            ],
            _ => Vec::new(),
        }
    }

    /// Plane window for an already validated parameter vector.
    fn window(self, params: &[f64]) -> (f64, f64) {
        match self {
            ProjectionKind::Tobler => Tobler::extent_for(params[0], params[1]),
            _ => self.build(params).extent(),
        }
    }

    pub fn descriptor(self) -> ProjectionDescriptor {
        let defaults: Vec<f64> = self.params().iter().map(|p| p.default).collect();
        self.descriptor_for_window(self.window(&defaults))
    }

    fn descriptor_for_window(self, (width, height): (f64, f64)) -> ProjectionDescriptor {
        let params = self.params();
        ProjectionDescriptor {
            name: self.name(),
            description: self.description(),
            aspect_ratio: width / height,
            width,
            height,
            topology: self.topology(),
            category: self.category(),
            property: self.property(),
            params,
        }
    }

    /// Construct the projection. `params` must already be validated.
    fn build(self, params: &[f64]) -> Arc<dyn Projection> {
        match self {
            ProjectionKind::Equirectangular => Arc::new(Equirectangular),
            ProjectionKind::Mercator => Arc::new(Mercator),
            ProjectionKind::GallStereographic => Arc::new(GallStereographic),
            ProjectionKind::CylindricalEqualArea => {
                Arc::new(CylindricalEqualArea::new(params[0].to_radians()))
            }
            ProjectionKind::AzimuthalEquidistant => Arc::new(AzimuthalEquidistant),
            ProjectionKind::Stereographic => Arc::new(Stereographic),
            ProjectionKind::LambertAzimuthal => Arc::new(LambertAzimuthal),
            ProjectionKind::Orthographic => Arc::new(Orthographic),
            ProjectionKind::Gnomonic => Arc::new(Gnomonic),
            ProjectionKind::LambertConic => {
                Arc::new(LambertConformalConic::new(params[0].to_radians()))
            }
            ProjectionKind::Sinusoidal => Arc::new(Sinusoidal),
            ProjectionKind::Mollweide => Arc::new(Mollweide),
            ProjectionKind::Hammer => Arc::new(Hammer),
            ProjectionKind::Aitoff => Arc::new(Aitoff),
            ProjectionKind::WinkelTripel => Arc::new(WinkelTripel::default()),
            ProjectionKind::VanDerGrinten => Arc::new(VanDerGrinten),
            ProjectionKind::Magnifier => Arc::new(Magnifier),
            ProjectionKind::PeirceQuincuncial => Arc::new(PeirceQuincuncial::new()),
            ProjectionKind::Guyou => Arc::new(Guyou::new()),
            ProjectionKind::Tobler => Arc::new(Tobler::new(params[0], params[1])),
        }
    }

    /// Validate the whole parameter vector, then build the projection.
    ///
    /// Nothing is constructed unless every value is in range.
    pub fn configure(self, params: &[f64]) -> Result<ConfiguredProjection, ProjError> {
        let specs = self.params();
        if params.len() != specs.len() {
            return Err(ProjError::ParameterCount {
                projection: self.name().to_string(),
                expected: specs.len(),
                got: params.len(),
            });
        }
        for (spec, &value) in specs.iter().zip(params) {
            spec.validate(value)?;
        }

        log::debug!("Configuring {} with {:?}", self.name(), params);
        Ok(ConfiguredProjection {
            kind: self,
            params: params.to_vec(),
            inner: self.build(params),
        })
    }

    /// Configure with every parameter at its default.
    pub fn configure_default(self) -> ConfiguredProjection {
        let params: Vec<f64> = self.params().iter().map(|p| p.default).collect();
        ConfiguredProjection {
            kind: self,
            inner: self.build(&params),
            params,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptors of every registered projection, in menu order.
pub fn list_projections() -> Vec<ProjectionDescriptor> {
    ProjectionKind::ALL.iter().map(|k| k.descriptor()).collect()
}

/// A projection with a validated parameter vector. Immutable and cheap to
/// clone; any precomputed tables are shared.
#[derive(Clone)]
pub struct ConfiguredProjection {
    kind: ProjectionKind,
    params: Vec<f64>,
    inner: Arc<dyn Projection>,
}

impl ConfiguredProjection {
    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Metadata with the plane window of the configured parameters.
    pub fn descriptor(&self) -> ProjectionDescriptor {
        self.kind.descriptor_for_window(self.inner.extent())
    }

    /// Width / height of the map at the configured parameters.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.inner.extent();
        w / h
    }

    /// Inverse of the underlying projection with longitudes left as the
    /// formula produces them, possibly past ±pi for plane points outside
    /// the map outline.
    pub fn inverse_unwrapped(&self, x: f64, y: f64) -> (f64, f64) {
        self.inner.inverse(x, y)
    }
}

impl Projection for ConfiguredProjection {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        self.inner.project(lat, lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (lat, lon) = self.inner.inverse(x, y);
        if lat.abs() > FRAC_PI_2 || lon.abs() > PI || lat.is_nan() || lon.is_nan() {
            return NAN_PAIR;
        }
        (lat, lon)
    }

    fn extent(&self) -> (f64, f64) {
        self.inner.extent()
    }
}

impl fmt::Debug for ConfiguredProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredProjection")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .finish()
    }
}

/// A projection slot that starts unconfigured.
///
/// `configure` moves it to the configured state; a failed `configure` leaves
/// whatever state it was in before.
#[derive(Debug, Clone)]
pub struct ProjectionInstance {
    kind: ProjectionKind,
    configured: Option<ConfiguredProjection>,
}

impl ProjectionInstance {
    pub fn new(kind: ProjectionKind) -> Self {
        Self {
            kind,
            configured: None,
        }
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn is_configured(&self) -> bool {
        self.configured.is_some()
    }

    pub fn configure(&mut self, params: &[f64]) -> Result<(), ProjError> {
        let configured = self.kind.configure(params)?;
        self.configured = Some(configured);
        Ok(())
    }

    pub fn get(&self) -> Result<&ConfiguredProjection, ProjError> {
        self.configured
            .as_ref()
            .ok_or_else(|| ProjError::Unconfigured(self.kind.name().to_string()))
    }

    pub fn project(&self, lat: f64, lon: f64) -> Result<(f64, f64), ProjError> {
        Ok(self.get()?.project(lat, lon))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        Ok(self.get()?.inverse(x, y))
    }
}
