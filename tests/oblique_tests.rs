//! Spherical rotation round trips and oblique projections.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use map_projections::proj::Projection;
use map_projections::rotation::{normalize_lon, AspectPreset};
use map_projections::{deobliquify, obliquify, ObliqueProjection, Pole, ProjectionKind};

fn coords() -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    for lat in [-80.0_f64, -45.0, -5.0, 0.0, 30.0, 75.0] {
        for lon in [-175.0_f64, -90.0, -10.0, 0.0, 60.0, 150.0, 180.0] {
            out.push((lat.to_radians(), lon.to_radians()));
        }
    }
    out
}

fn poles() -> Vec<Pole> {
    let mut poles = vec![
        Pole::new(FRAC_PI_2, 0.0, 0.0),
        Pole::new(FRAC_PI_2, 1.2, -0.4),
        Pole::new(-FRAC_PI_2, 0.0, 0.0),
        Pole::new(-FRAC_PI_2, -2.0, 0.7),
        Pole::new(0.0, 0.0, 0.0),
        Pole::new(0.0, 2.5, 1.0),
        Pole::from_degrees(45.0, -100.0, 30.0),
        Pole::from_degrees(-89.999, 10.0, 0.0),
    ];
    poles.extend(AspectPreset::ALL.iter().map(|p| p.pole()));
    poles
}

/// Angular distance between two points, immune to longitude wrapping.
fn separation(a: (f64, f64), b: (f64, f64)) -> f64 {
    let cos_d = a.0.sin() * b.0.sin() + a.0.cos() * b.0.cos() * (a.1 - b.1).cos();
    cos_d.clamp(-1.0, 1.0).acos()
}

#[test]
fn test_deobliquify_inverts_obliquify() {
    for pole in poles() {
        for c in coords() {
            let back = deobliquify(&pole, obliquify(&pole, c));
            assert_relative_eq!(back.0, c.0, epsilon = 1e-9);
            assert!(separation(back, c) < 1e-7, "{pole:?}: {c:?} -> {back:?}");
        }
    }
}

#[test]
fn test_obliquify_inverts_deobliquify() {
    for pole in poles() {
        for c in coords() {
            let back = obliquify(&pole, deobliquify(&pole, c));
            assert!(separation(back, c) < 1e-7, "{pole:?}: {c:?} -> {back:?}");
        }
    }
}

#[test]
fn test_rotation_preserves_distance() {
    let pole = Pole::from_degrees(20.0, 70.0, -15.0);
    let a = (0.3, -1.1);
    let b = (-0.6, 2.4);
    let before = separation(a, b);
    let after = separation(obliquify(&pole, a), obliquify(&pole, b));
    assert_relative_eq!(before, after, epsilon = 1e-12);
}

#[test]
fn test_pole_maps_to_north() {
    let pole = Pole::from_degrees(-33.0, 151.0, 0.0);
    let (lat, _) = obliquify(&pole, (pole.lat, pole.lon));
    assert_relative_eq!(lat, FRAC_PI_2, epsilon = 1e-9);
}

#[test]
fn test_longitudes_stay_normalised() {
    for pole in poles() {
        for c in coords() {
            let (_, lon) = obliquify(&pole, c);
            assert!(lon > -PI - 1e-12 && lon <= PI, "{lon}");
        }
    }
    assert_relative_eq!(normalize_lon(-PI), PI);
    assert_relative_eq!(normalize_lon(PI + 1.0), 1.0 - PI, epsilon = 1e-12);
}

#[test]
fn test_oblique_projection_round_trip() {
    let kinds = [
        ProjectionKind::Mollweide,
        ProjectionKind::AzimuthalEquidistant,
        ProjectionKind::Hammer,
        ProjectionKind::Equirectangular,
    ];
    for kind in kinds {
        for preset in [AspectPreset::Transverse, AspectPreset::PointNemo, AspectPreset::LongestLine] {
            let proj = ObliqueProjection::new(kind.configure_default(), preset.pole());
            for &(lat, lon) in &[(0.4, 0.9), (-0.8, -2.2), (1.1, 2.9)] {
                let (x, y) = proj.project(lat, lon);
                if x.is_nan() {
                    continue;
                }
                let back = proj.inverse(x, y);
                assert!(
                    separation(back, (lat, lon)) < 1e-6,
                    "{kind} {preset:?}: ({lat}, {lon}) -> {back:?}"
                );
            }
        }
    }
}

#[test]
fn test_antipode_preset_flips_view() {
    let pole = AspectPreset::Jerusalem.pole();
    let anti = pole.antipode();
    assert_relative_eq!(anti.lat, -pole.lat);
    assert_relative_eq!(separation((pole.lat, pole.lon), (anti.lat, anti.lon)), PI, epsilon = 1e-6);
    assert_relative_eq!(anti.antipode().lon, pole.lon, epsilon = 1e-12);
}
