use crate::error::GridError;

/// A 2D affine transform between image pixels and the projection plane.
///
/// Maps pixel coordinates (col, row) to plane coordinates (x, y):
///   x = a * col + b * row + c
///   y = d * col + e * row + f
///
/// Rows grow downward, so a north-up image has `e < 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Fit a `width` × `height` plane window centred on the origin into an
    /// image of `cols` × `rows` pixels, north up.
    pub fn for_plane(width: f64, height: f64, cols: usize, rows: usize) -> Self {
        let sx = width / cols as f64;
        let sy = height / rows as f64;
        Self {
            a: sx,
            b: 0.0,
            c: -width / 2.0,
            d: 0.0,
            e: -sy,
            f: height / 2.0,
        }
    }

    /// Apply the forward transform: (col, row) -> (x, y).
    pub fn forward(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.a * col + self.b * row + self.c;
        let y = self.d * col + self.e * row + self.f;
        (x, y)
    }

    /// Plane coordinates of the centre of pixel (col, row).
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.forward(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Compute the inverse affine transform: (x, y) -> (col, row).
    pub fn inverse(&self) -> Result<Affine, GridError> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return Err(GridError::SingularTransform(
                "Singular affine transform (determinant is zero)".into(),
            ));
        }
        let inv_det = 1.0 / det;
        Ok(Affine {
            a: self.e * inv_det,
            b: -self.b * inv_det,
            c: (self.b * self.f - self.e * self.c) * inv_det,
            d: -self.d * inv_det,
            e: self.a * inv_det,
            f: (self.d * self.c - self.a * self.f) * inv_det,
        })
    }
}
