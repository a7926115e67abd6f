//! Spherical rotation that moves an arbitrary point to the projection pole.
//!
//! An oblique aspect is a [`Pole`]: the point of the globe that becomes the
//! north pole of the projection, plus a rotation `theta` about it.
//! [`obliquify`] maps standard coordinates into that rotated frame and
//! [`deobliquify`] maps them back.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Target pole of an oblique aspect, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub lat: f64,
    pub lon: f64,
    /// Rotation of the oblique frame about the new pole.
    pub theta: f64,
}

impl Pole {
    /// The standard aspect: the rotation is the identity.
    pub const NORTH: Pole = Pole {
        lat: FRAC_PI_2,
        lon: 0.0,
        theta: 0.0,
    };

    pub const fn new(lat: f64, lon: f64, theta: f64) -> Self {
        Self { lat, lon, theta }
    }

    pub fn from_degrees(lat: f64, lon: f64, theta: f64) -> Self {
        Self::new(lat.to_radians(), lon.to_radians(), theta.to_radians())
    }

    pub fn to_degrees(self) -> (f64, f64, f64) {
        (
            self.lat.to_degrees(),
            self.lon.to_degrees(),
            self.theta.to_degrees(),
        )
    }

    /// The opposite point of the globe, viewed from the other side.
    pub fn antipode(self) -> Self {
        Self::new(-self.lat, normalize_lon(self.lon + PI), -self.theta)
    }
}

impl Default for Pole {
    fn default() -> Self {
        Self::NORTH
    }
}

/// Named oblique aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectPreset {
    Standard,
    Transverse,
    CenterOfMass,
    Jerusalem,
    PointNemo,
    LongestLine,
    LongestLineTransverse,
    Cylindrical,
    Conical,
    Quincuncial,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 10] = [
        AspectPreset::Standard,
        AspectPreset::Transverse,
        AspectPreset::CenterOfMass,
        AspectPreset::Jerusalem,
        AspectPreset::PointNemo,
        AspectPreset::LongestLine,
        AspectPreset::LongestLineTransverse,
        AspectPreset::Cylindrical,
        AspectPreset::Conical,
        AspectPreset::Quincuncial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AspectPreset::Standard => "Standard",
            AspectPreset::Transverse => "Transverse",
            AspectPreset::CenterOfMass => "Center of Mass",
            AspectPreset::Jerusalem => "Jerusalem",
            AspectPreset::PointNemo => "Point Nemo",
            AspectPreset::LongestLine => "Longest Line",
            AspectPreset::LongestLineTransverse => "Longest Line Transverse",
            AspectPreset::Cylindrical => "Cylindrical",
            AspectPreset::Conical => "Conical",
            AspectPreset::Quincuncial => "Quincuncial",
        }
    }

    /// `(lat, lon, theta)` in degrees.
    pub fn degrees(self) -> (f64, f64, f64) {
        match self {
            AspectPreset::Standard => (90.0, 0.0, 0.0),
            AspectPreset::Transverse => (0.0, 0.0, 0.0),
            AspectPreset::CenterOfMass => (29.9792, 31.1344, -32.0),
            AspectPreset::Jerusalem => (31.7833, 35.216, -35.0),
            AspectPreset::PointNemo => (48.8767, 56.6067, -45.0),
            AspectPreset::LongestLine => (-28.5217, 141.451, 161.5),
            AspectPreset::LongestLineTransverse => (-46.4883, 16.5305, 137.0),
            AspectPreset::Cylindrical => (-35.0, -13.6064, 145.0),
            AspectPreset::Conical => (-10.0, 65.0, -150.0),
            AspectPreset::Quincuncial => (60.0, -6.0, -10.0),
        }
    }

    pub fn pole(self) -> Pole {
        let (lat, lon, theta) = self.degrees();
        Pole::from_degrees(lat, lon, theta)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Wrap a longitude into `(-pi, pi]` with a floored modulo.
#[inline]
pub fn normalize_lon(lon: f64) -> f64 {
    PI - (PI - lon).rem_euclid(TAU)
}

#[inline]
fn unit_vector(lat: f64, lon: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Standard `(lat, lon)` to coordinates in the frame whose north pole is
/// `pole`.
///
/// The poles are matched by exact equality; a pole latitude merely close to
/// ±pi/2 takes the general cross-product path.
pub fn obliquify(pole: &Pole, coords: (f64, f64)) -> (f64, f64) {
    let (lat_f, lon_f) = coords;
    let r0 = unit_vector(pole.lat, pole.lon);
    let rf = unit_vector(lat_f, lon_f);

    let lat1 = r0.dot(rf).clamp(-1.0, 1.0).asin();

    let mut lon1 = if pole.lat == FRAC_PI_2 {
        lon_f - pole.lon
    } else if pole.lat == -FRAC_PI_2 {
        pole.lon - lon_f + PI
    } else {
        let a = r0.cross(rf);
        let b = r0.cross(DVec3::Z);
        let norm = a.length() * b.length();
        let lon1 = (a.dot(b) / norm).clamp(-1.0, 1.0).acos() - PI;
        if lon1.is_nan() {
            // the point is the pole itself or its antipode
            0.0
        } else if a.cross(b).dot(r0) / norm > 0.0 {
            TAU - lon1
        } else {
            lon1
        }
    };

    lon1 -= pole.theta;
    (lat1, normalize_lon(lon1))
}

/// Inverse of [`obliquify`]: oblique-frame `(lat, lon)` back to standard
/// coordinates. Input longitudes outside `(-pi, pi]` are wrapped.
pub fn deobliquify(pole: &Pole, coords: (f64, f64)) -> (f64, f64) {
    let (lat1, lon1) = coords;
    if lat1.is_nan() || lon1.is_nan() {
        return (f64::NAN, f64::NAN);
    }

    if pole.lat == FRAC_PI_2 {
        return (lat1, normalize_lon(lon1 + pole.theta + pole.lon));
    }
    if pole.lat == -FRAC_PI_2 {
        return (-lat1, normalize_lon(pole.lon + PI - pole.theta - lon1));
    }

    // Oblique frame: r0 up, u at oblique longitude 0 (pointing away from the
    // old north pole), v = r0 x u at oblique longitude pi/2.
    let r0 = unit_vector(pole.lat, pole.lon);
    let (sin_lat0, cos_lat0) = pole.lat.sin_cos();
    let (sin_lon0, cos_lon0) = pole.lon.sin_cos();
    let toward_north = DVec3::new(-sin_lat0 * cos_lon0, -sin_lat0 * sin_lon0, cos_lat0);
    let u = -toward_north;
    let v = r0.cross(u);

    let lon = lon1 + pole.theta;
    let (sin_lat, cos_lat) = lat1.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let rf = r0 * sin_lat + (u * cos_lon + v * sin_lon) * cos_lat;

    let lat = rf.z.clamp(-1.0, 1.0).asin();
    let lon = rf.y.atan2(rf.x);
    (lat, normalize_lon(lon))
}

/// Rotate many points into the oblique frame, in place.
pub fn obliquify_batch(pole: &Pole, coords: &mut [(f64, f64)]) {
    for c in coords.iter_mut() {
        *c = obliquify(pole, *c);
    }
}

/// Rotate many points back to the standard frame, in place.
pub fn deobliquify_batch(pole: &Pole, coords: &mut [(f64, f64)]) {
    for c in coords.iter_mut() {
        *c = deobliquify(pole, *c);
    }
}
