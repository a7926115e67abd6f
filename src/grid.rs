//! Sampling grids over the sphere and over a projection's plane.
//!
//! Every grid is row-major with rows running north to south and stores the
//! (lat, lon) of each sample in radians. Evaluation is parallel over cells;
//! each worker only reads the projection and writes its own output cell.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use ndarray::{Array2, Zip};

use crate::affine::Affine;
use crate::error::GridError;
use crate::proj::{ObliqueProjection, Projection};
use crate::rotation::{deobliquify, normalize_lon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    /// Equal angular steps in latitude and longitude. Fast, but over-weights
    /// the poles; never use it for aggregate statistics.
    Regular,
    /// Equal solid angle per sample.
    GlobeUniform,
    /// Pixel centres of a projected map, inverse-projected to the sphere.
    MapImage,
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub kind: GridKind,
    pub lat: Array2<f64>,
    pub lon: Array2<f64>,
    /// Nominal angular distance between neighbouring samples, in radians.
    pub spacing: f64,
    /// Whether stencils that cross the antimeridian are discarded.
    pub crop_antimeridian: bool,
}

impl Grid {
    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.lat.dim()
    }

    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// Whether a sample at `lon` reaching `h` radians to either side is
    /// dropped at the antimeridian. Only cropped regular grids drop samples.
    pub fn crosses_seam(&self, lon: f64, h: f64) -> bool {
        self.kind == GridKind::Regular
            && self.crop_antimeridian
            && (lon - h < -PI || lon + h > PI)
    }
}

/// How a sphere grid is laid out. The resolution unit depends on the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// `resolution` columns by `resolution / 2` rows.
    Regular {
        resolution: usize,
        crop_antimeridian: bool,
    },
    /// Samples about `angular_resolution` radians apart, each covering the
    /// same solid angle.
    GlobeUniform { angular_resolution: f64 },
}

/// Build the sphere grid described by `sampling`.
pub fn sample_grid(sampling: Sampling) -> Result<Grid, GridError> {
    match sampling {
        Sampling::Regular {
            resolution,
            crop_antimeridian,
        } => regular_grid(resolution, crop_antimeridian),
        Sampling::GlobeUniform { angular_resolution } => globe_uniform_grid(angular_resolution),
    }
}

/// Equal-angle grid over the whole sphere.
///
/// Rows sit on band centres; the first column lies on the antimeridian, so a
/// cropped grid loses exactly that column to the seam.
pub fn regular_grid(resolution: usize, crop_antimeridian: bool) -> Result<Grid, GridError> {
    if resolution < 2 {
        return Err(GridError::InvalidResolution(format!(
            "regular grid needs at least 2 columns, got {resolution}"
        )));
    }
    let cols = resolution;
    let rows = resolution / 2;
    let step = TAU / cols as f64;

    let lat = Array2::from_shape_fn((rows, cols), |(r, _)| FRAC_PI_2 - (r as f64 + 0.5) * step);
    let lon = Array2::from_shape_fn((rows, cols), |(_, c)| -PI + c as f64 * step);

    Ok(Grid {
        kind: GridKind::Regular,
        lat,
        lon,
        spacing: step,
        crop_antimeridian,
    })
}

/// Area-uniform grid: rows equally spaced in `sin(lat)`, columns equally
/// spaced in longitude, so every cell covers the same solid angle.
pub fn globe_uniform_grid(angular_resolution: f64) -> Result<Grid, GridError> {
    if !(angular_resolution > 0.0 && angular_resolution <= 1.0) {
        return Err(GridError::InvalidResolution(format!(
            "angular resolution must be in (0, 1], got {angular_resolution}"
        )));
    }
    let rows = ((2.0 / angular_resolution).round() as usize).max(1);
    let cols = ((TAU / angular_resolution).round() as usize).max(1);
    let dz = 2.0 / rows as f64;
    let dlon = TAU / cols as f64;

    let lat = Array2::from_shape_fn((rows, cols), |(r, _)| {
        (1.0 - (r as f64 + 0.5) * dz).clamp(-1.0, 1.0).asin()
    });
    let lon = Array2::from_shape_fn((rows, cols), |(_, c)| -PI + (c as f64 + 0.5) * dlon);

    Ok(Grid {
        kind: GridKind::GlobeUniform,
        lat,
        lon,
        spacing: angular_resolution,
        crop_antimeridian: false,
    })
}

/// Width and height in pixels of an image of the given aspect ratio whose
/// longer side is `size`.
pub fn image_dimensions(aspect_ratio: f64, size: usize) -> Result<(usize, usize), GridError> {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(GridError::InvalidAspect(format!("{aspect_ratio}")));
    }
    if size == 0 {
        return Err(GridError::InvalidResolution("image size must be positive".into()));
    }
    let size_f = size as f64;
    let dims = if aspect_ratio >= 1.0 {
        (size, ((size_f / aspect_ratio).round() as usize).max(1))
    } else {
        (((size_f * aspect_ratio).round() as usize).max(1), size)
    };
    Ok(dims)
}

/// Inverse-project the pixel centres of a `resolution`-wide image of `proj`.
///
/// Pixels outside the map are NaN. Points the base projection places beyond
/// the antimeridian are NaN when `crop` is set and wrapped back otherwise.
pub fn map_image_grid(
    proj: &ObliqueProjection,
    resolution: usize,
    crop: bool,
) -> Result<Grid, GridError> {
    if resolution == 0 {
        return Err(GridError::InvalidResolution("map image needs at least 1 column".into()));
    }
    let (width, height) = proj.extent();
    let aspect = width / height;
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(GridError::InvalidAspect(format!("{width} x {height}")));
    }
    let cols = resolution;
    let rows = ((resolution as f64 / aspect).round() as usize).max(1);
    let affine = Affine::for_plane(width, height, cols, rows);
    let pole = *proj.pole();

    let mut lat = Array2::from_elem((rows, cols), f64::NAN);
    let mut lon = Array2::from_elem((rows, cols), f64::NAN);
    Zip::indexed(&mut lat)
        .and(&mut lon)
        .par_for_each(|(r, c), la, lo| {
            let (x, y) = affine.pixel_center(c, r);
            let (lat1, lon1) = proj.inverse_oblique(x, y);
            if lat1.is_nan() || lon1.is_nan() {
                return;
            }
            let lon1 = if lon1.abs() <= PI {
                lon1
            } else if crop {
                return;
            } else {
                normalize_lon(lon1)
            };
            let (lat0, lon0) = deobliquify(&pole, (lat1, lon1));
            *la = lat0;
            *lo = lon0;
        });

    Ok(Grid {
        kind: GridKind::MapImage,
        lat,
        lon,
        spacing: width / cols as f64,
        crop_antimeridian: false,
    })
}

/// Forward-project every sample of `grid`. Returns the (x, y) planes.
///
/// On a cropped grid the samples on the antimeridian stay NaN.
pub fn project_grid<P>(proj: &P, grid: &Grid) -> (Array2<f64>, Array2<f64>)
where
    P: Projection + ?Sized,
{
    let half_cell = grid.spacing / 2.0;
    let dim = grid.shape();
    let mut xs = Array2::from_elem(dim, f64::NAN);
    let mut ys = Array2::from_elem(dim, f64::NAN);
    Zip::from(&mut xs)
        .and(&mut ys)
        .and(&grid.lat)
        .and(&grid.lon)
        .par_for_each(|x, y, &lat, &lon| {
            if lat.is_nan() || lon.is_nan() || grid.crosses_seam(lon, half_cell) {
                return;
            }
            let (px, py) = proj.project(lat, lon);
            *x = px;
            *y = py;
        });
    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ProjectionKind;
    use crate::rotation::Pole;
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_grid_shape_and_centres() {
        let grid = regular_grid(8, true).unwrap();
        assert_eq!(grid.shape(), (4, 8));
        assert_relative_eq!(grid.lat[(0, 0)], FRAC_PI_2 - PI / 8.0);
        assert_relative_eq!(grid.lon[(0, 0)], -PI);
        assert_relative_eq!(grid.lon[(0, 7)], PI - PI / 4.0);
        assert_relative_eq!(grid.lat[(3, 0)], -grid.lat[(0, 0)]);
        assert!(grid.crop_antimeridian);
    }

    #[test]
    fn test_regular_grid_rejects_tiny_resolution() {
        assert!(matches!(
            regular_grid(1, false),
            Err(GridError::InvalidResolution(_))
        ));
    }

    #[test]
    fn test_globe_grid_rows_equal_area() {
        let grid = globe_uniform_grid(0.1).unwrap();
        let (rows, cols) = grid.shape();
        assert_eq!(rows, 20);
        assert_eq!(cols, 63);
        // consecutive row boundaries are equally spaced in sin(lat)
        let z: Vec<f64> = (0..rows).map(|r| grid.lat[(r, 0)].sin()).collect();
        for w in z.windows(2) {
            assert_relative_eq!(w[0] - w[1], 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_globe_grid_rejects_bad_resolution() {
        assert!(globe_uniform_grid(0.0).is_err());
        assert!(globe_uniform_grid(f64::NAN).is_err());
        assert!(globe_uniform_grid(1.5).is_err());
    }

    #[test]
    fn test_sample_grid_dispatches() {
        let grid = sample_grid(Sampling::GlobeUniform {
            angular_resolution: 0.5,
        })
        .unwrap();
        assert_eq!(grid.kind, GridKind::GlobeUniform);
        let grid = sample_grid(Sampling::Regular {
            resolution: 10,
            crop_antimeridian: false,
        })
        .unwrap();
        assert_eq!(grid.kind, GridKind::Regular);
    }

    #[test]
    fn test_image_dimensions() {
        assert_eq!(image_dimensions(2.0, 1000).unwrap(), (1000, 500));
        assert_eq!(image_dimensions(0.5, 1000).unwrap(), (500, 1000));
        assert!(image_dimensions(0.0, 10).is_err());
    }

    #[test]
    fn test_project_grid_equirectangular() {
        let proj = ProjectionKind::Equirectangular.configure(&[]).unwrap();
        let grid = regular_grid(16, false).unwrap();
        let (xs, ys) = project_grid(&proj, &grid);
        assert_relative_eq!(xs[(2, 5)], grid.lon[(2, 5)]);
        assert_relative_eq!(ys[(2, 5)], grid.lat[(2, 5)]);
    }

    #[test]
    fn test_project_grid_drops_seam_column_when_cropped() {
        let proj = ProjectionKind::Sinusoidal.configure(&[]).unwrap();
        let cropped = regular_grid(16, true).unwrap();
        let (xs, ys) = project_grid(&proj, &cropped);
        assert!(xs.column(0).iter().all(|v| v.is_nan()));
        assert!(ys.column(0).iter().all(|v| v.is_nan()));
        assert!(xs.column(15).iter().all(|v| v.is_finite()));
        assert!(xs.column(1).iter().all(|v| v.is_finite()));

        let full = regular_grid(16, false).unwrap();
        let (xs, _) = project_grid(&proj, &full);
        assert!(xs.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_map_image_grid_mollweide_corners_empty() {
        let base = ProjectionKind::Mollweide.configure(&[]).unwrap();
        let proj = ObliqueProjection::new(base, Pole::NORTH);
        let grid = map_image_grid(&proj, 40, true).unwrap();
        assert_eq!(grid.shape(), (20, 40));
        assert!(grid.lat[(0, 0)].is_nan());
        assert!(grid.lat[(10, 20)].is_finite());
        assert!(grid.lat[(10, 20)].abs() < 0.2);
    }

    #[test]
    fn test_map_image_grid_crop_versus_wrap() {
        // outside the sinusoid the inverse runs past the antimeridian
        let base = ProjectionKind::Sinusoidal.configure(&[]).unwrap();
        let proj = ObliqueProjection::new(base, Pole::NORTH);
        let cropped = map_image_grid(&proj, 40, true).unwrap();
        let wrapped = map_image_grid(&proj, 40, false).unwrap();
        let finite = |g: &Grid| g.lat.iter().filter(|v| v.is_finite()).count();
        assert_eq!(finite(&wrapped), 800);
        assert!(finite(&cropped) < 600);
        assert!(cropped.lon[(0, 0)].is_nan());
        assert!(wrapped.lon[(0, 0)].abs() <= PI);
    }
}
