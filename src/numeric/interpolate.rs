//! Table interpolation helpers.

use num_traits::Float;

/// Straight-line interpolation between `(x0, y0)` and `(x1, y1)`.
#[inline]
pub fn lin_interp<T: Float>(x: T, x0: T, x1: T, y0: T, y1: T) -> T {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Aitken–Neville polynomial interpolation at `x` through the samples
/// `xs[from..to]`, `fs[from..to]`.
///
/// The tableau is reduced in place. An empty or out-of-bounds range yields
/// NaN.
pub fn aitken_interpolate<T: Float>(x: T, xs: &[T], fs: &[T], from: usize, to: usize) -> T {
    if to <= from || to > xs.len() || to > fs.len() {
        return T::nan();
    }
    let xs = &xs[from..to];
    let mut p = fs[from..to].to_vec();
    let n = p.len();

    for i in 1..n {
        let pivot = p[i - 1];
        let dx_pivot = xs[i - 1] - x;
        for j in i..n {
            p[j] = (pivot * (xs[j] - x) - p[j] * dx_pivot) / (xs[j] - xs[i - 1]);
        }
    }
    p[n - 1]
}
