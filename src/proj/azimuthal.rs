//! Polar azimuthal projections, centred on the north pole.
//!
//! Every variant places a point at bearing λ and radius r(c), where
//! c = π/2 − φ is the colatitude:
//!
//!   equidistant:  r = c
//!   stereographic: r = 2·tan(c/2)
//!   equal-area:   r = 2·sin(c/2)
//!   orthographic: r = sin(c)    (near hemisphere only)
//!   gnomonic:     r = tan(c)    (near hemisphere only)
//!   magnifier:    r = π·(1 − 0.1p − 0.9p⁷), p = 1/2 + φ/π

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::numeric::newton_raphson_1d;
use crate::proj::common::{from_polar, to_polar, NAN_PAIR};
use crate::proj::Projection;

#[derive(Debug, Clone, Copy, Default)]
pub struct AzimuthalEquidistant;

impl Projection for AzimuthalEquidistant {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        from_polar(FRAC_PI_2 - lat, lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        if r > PI {
            return NAN_PAIR;
        }
        (FRAC_PI_2 - r, lon)
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, TAU)
    }
}

/// Conformal. The south pole is at infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stereographic;

/// Radius at which the stereographic window is cut (about 53°S).
const STEREO_WINDOW: f64 = 4.0;

impl Projection for Stereographic {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if lat <= -FRAC_PI_2 {
            return NAN_PAIR;
        }
        from_polar(2.0 * ((FRAC_PI_2 - lat) / 2.0).tan(), lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        (FRAC_PI_2 - 2.0 * (r / 2.0).atan(), lon)
    }

    fn extent(&self) -> (f64, f64) {
        (2.0 * STEREO_WINDOW, 2.0 * STEREO_WINDOW)
    }
}

/// Lambert azimuthal equal-area. The south pole is the rim circle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambertAzimuthal;

impl Projection for LambertAzimuthal {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        from_polar(2.0 * ((FRAC_PI_2 - lat) / 2.0).sin(), lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        if r > 2.0 {
            return NAN_PAIR;
        }
        (FRAC_PI_2 - 2.0 * (r / 2.0).asin(), lon)
    }

    fn extent(&self) -> (f64, f64) {
        (4.0, 4.0)
    }
}

/// The globe as seen from infinitely far above the north pole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orthographic;

impl Projection for Orthographic {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if lat < 0.0 {
            return NAN_PAIR;
        }
        from_polar(lat.cos(), lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        if r > 1.0 {
            return NAN_PAIR;
        }
        (r.acos(), lon)
    }

    fn extent(&self) -> (f64, f64) {
        (2.0, 2.0)
    }
}

/// Central perspective: great circles are straight lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gnomonic;

/// Radius at which the gnomonic window is cut (about 18°N).
const GNOMONIC_WINDOW: f64 = 3.0;

impl Projection for Gnomonic {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        if lat <= 0.0 {
            return NAN_PAIR;
        }
        from_polar(1.0 / lat.tan(), lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        (FRAC_PI_2 - r.atan(), lon)
    }

    fn extent(&self) -> (f64, f64) {
        (2.0 * GNOMONIC_WINDOW, 2.0 * GNOMONIC_WINDOW)
    }
}

/// Azimuthal projection that enlarges the region around the centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct Magnifier;

const MAGNIFIER_TOLERANCE: f64 = 1e-12;

impl Magnifier {
    #[inline]
    fn radius_fraction(p: f64) -> f64 {
        1.0 - 0.1 * p - 0.9 * p.powi(7)
    }

    #[inline]
    fn radius_fraction_slope(p: f64) -> f64 {
        -0.1 - 6.3 * p.powi(6)
    }
}

impl Projection for Magnifier {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let p = 0.5 + lat / PI;
        from_polar(PI * Self::radius_fraction(p), lon)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (r, lon) = to_polar(x, y);
        if r > PI {
            return NAN_PAIR;
        }
        let target = r / PI;
        // dropping either term overestimates the root, so Newton approaches
        // it monotonically from above on this concave curve
        let gap = (1.0 - target).max(0.0);
        let p0 = (gap / 0.1).min((gap / 0.9).powf(1.0 / 7.0)).min(1.0);
        match newton_raphson_1d(
            target,
            p0,
            Self::radius_fraction,
            Self::radius_fraction_slope,
            MAGNIFIER_TOLERANCE,
        ) {
            Some(p) => ((p - 0.5) * PI, lon),
            None => NAN_PAIR,
        }
    }

    fn extent(&self) -> (f64, f64) {
        (TAU, TAU)
    }
}
