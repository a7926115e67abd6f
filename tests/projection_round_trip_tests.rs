//! Forward/inverse round trips for every registered projection.
//!
//! Each projection is sampled on a lattice of points inside its valid
//! domain; hemisphere-only projections use their visible hemisphere.

use approx::assert_relative_eq;
use map_projections::proj::Projection;
use map_projections::ProjectionKind;

const LATS: [f64; 5] = [-50.0, -15.0, 10.0, 40.0, 65.0];
const NORTH_LATS: [f64; 3] = [15.0, 40.0, 65.0];
const LONS: [f64; 5] = [-140.0, -70.0, 0.0, 35.0, 110.0];

fn lats_for(kind: ProjectionKind) -> &'static [f64] {
    match kind {
        ProjectionKind::Orthographic | ProjectionKind::Gnomonic => &NORTH_LATS,
        _ => &LATS,
    }
}

fn tolerance_for(kind: ProjectionKind) -> f64 {
    match kind {
        // linear interpolation in the latitude table
        ProjectionKind::Tobler => 1e-5,
        _ => 1e-6,
    }
}

#[test]
fn test_every_projection_round_trips() {
    for kind in ProjectionKind::ALL {
        let proj = kind.configure_default();
        let tol = tolerance_for(kind);
        for &lat_deg in lats_for(kind) {
            for &lon_deg in &LONS {
                let lat = lat_deg.to_radians();
                let lon = lon_deg.to_radians();
                let (x, y) = proj.project(lat, lon);
                assert!(x.is_finite() && y.is_finite(), "{kind}: project({lat_deg}, {lon_deg})");
                let (lat2, lon2) = proj.inverse(x, y);
                assert!(
                    (lat2 - lat).abs() < tol && (lon2 - lon).abs() < tol,
                    "{kind}: ({lat_deg}, {lon_deg}) came back as ({}, {})",
                    lat2.to_degrees(),
                    lon2.to_degrees()
                );
            }
        }
    }
}

#[test]
fn test_round_trips_with_parameters() {
    let cases: [(ProjectionKind, &[f64]); 5] = [
        (ProjectionKind::CylindricalEqualArea, &[0.0]),
        (ProjectionKind::CylindricalEqualArea, &[60.0]),
        (ProjectionKind::LambertConic, &[20.0]),
        (ProjectionKind::Tobler, &[0.5, 1.5]),
        (ProjectionKind::Tobler, &[1.0, 5.0]),
    ];
    for (kind, params) in cases {
        let proj = kind.configure(params).unwrap();
        for &(lat_deg, lon_deg) in &[(-35.0, -120.0), (5.0, 20.0), (55.0, 160.0)] {
            let lat = f64::to_radians(lat_deg);
            let lon = f64::to_radians(lon_deg);
            let (x, y) = proj.project(lat, lon);
            let (lat2, lon2) = proj.inverse(x, y);
            assert_relative_eq!(lat2, lat, epsilon = 1e-5);
            assert_relative_eq!(lon2, lon, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_extent_holds_bounded_maps() {
    for d in map_projections::list_projections() {
        if !d.topology.contains(map_projections::proj::Topology::BOUNDED) {
            continue;
        }
        let kind = ProjectionKind::from_name(d.name).unwrap();
        let proj = kind.configure_default();
        let (w, h) = proj.extent();
        for lat in [-80.0_f64, -30.0, 0.0, 30.0, 80.0] {
            for lon in [-179.0_f64, -90.0, 0.0, 90.0, 179.0] {
                let (x, y) = proj.project(lat.to_radians(), lon.to_radians());
                if x.is_nan() {
                    continue;
                }
                assert!(
                    x.abs() <= w / 2.0 + 1e-6 && y.abs() <= h / 2.0 + 1e-6,
                    "{}: ({lat}, {lon}) -> ({x}, {y}) outside {w} x {h}",
                    d.name
                );
            }
        }
    }
}

#[test]
fn test_plane_outside_map_is_nan() {
    let far = [
        ProjectionKind::Mollweide,
        ProjectionKind::Hammer,
        ProjectionKind::Aitoff,
        ProjectionKind::VanDerGrinten,
        ProjectionKind::Orthographic,
        ProjectionKind::LambertAzimuthal,
        ProjectionKind::PeirceQuincuncial,
        ProjectionKind::Guyou,
    ];
    for kind in far {
        let proj = kind.configure_default();
        let (w, h) = proj.extent();
        let (lat, lon) = proj.inverse(w, h);
        assert!(lat.is_nan() && lon.is_nan(), "{kind}");
    }
}

#[test]
fn test_plane_inside_window_but_off_outline_is_nan() {
    // near the top-right corner of the window, past the curved edge
    let curved = [
        ProjectionKind::Sinusoidal,
        ProjectionKind::Mollweide,
        ProjectionKind::Hammer,
        ProjectionKind::Aitoff,
        ProjectionKind::Tobler,
    ];
    for kind in curved {
        let proj = kind.configure_default();
        let (w, h) = proj.extent();
        let (lat, lon) = proj.inverse(0.95 * w / 2.0, 0.9 * h / 2.0);
        assert!(lat.is_nan() && lon.is_nan(), "{kind}: ({lat}, {lon})");
    }

    // every finite inverse must project back onto the same plane point
    for kind in curved {
        let proj = kind.configure_default();
        let (w, h) = proj.extent();
        for i in 0..=20 {
            for j in 0..=10 {
                let x = (i as f64 / 20.0 - 0.5) * 0.98 * w;
                let y = (j as f64 / 10.0 - 0.5) * 0.98 * h;
                let (lat, lon) = proj.inverse(x, y);
                if lat.is_nan() {
                    continue;
                }
                let (x2, y2) = proj.project(lat, lon);
                assert!(
                    (x2 - x).abs() < 1e-4 && (y2 - y).abs() < 1e-4,
                    "{kind}: ({x}, {y}) -> ({lat}, {lon}) -> ({x2}, {y2})"
                );
            }
        }
    }
}

#[test]
fn test_equirectangular_scenarios() {
    let proj = ProjectionKind::Equirectangular.configure(&[]).unwrap();
    assert_eq!(proj.project(0.0, 0.0), (0.0, 0.0));
    let (x, y) = proj.project(std::f64::consts::FRAC_PI_4, std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(x, std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(y, std::f64::consts::FRAC_PI_4);
}

#[test]
fn test_mercator_scenarios() {
    let proj = ProjectionKind::Mercator.configure(&[]).unwrap();
    let (lat, lon) = proj.inverse(0.0, 0.0);
    assert_relative_eq!(lat, 0.0);
    assert_relative_eq!(lon, 0.0);
    let (_, y) = proj.project(std::f64::consts::FRAC_PI_2, 0.3);
    assert!(!y.is_finite());
}
