use super::complex::Complex;

/// Number of series terms summed by [`elliptic_f`].
pub const SERIES_TERMS: usize = 100;

/// Incomplete elliptic integral of the first kind `F(phi | k)` for complex
/// amplitude, by the binomial series
///
/// `F = sum_n |C(-1/2, n)| k^(2n) I_n`, `I_n = integral_0^phi sin^(2n)`,
///
/// with `I_n = (2n-1)/(2n) I_(n-1) - cos(phi) sin^(2n-1)(phi) / (2n)`.
/// Coefficients, powers of `k` and powers of `sin(phi)` are all carried from
/// the previous term.
///
/// Accurate while `|k sin(phi)| < 1`; near the boundary the series converges
/// slowly.
pub fn elliptic_f(phi: Complex, k: f64) -> Complex {
    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let sin_sq = sin_phi * sin_phi;
    let k_sq = k * k;

    let mut integral = phi;
    let mut sin_pow = sin_phi;
    let mut weight = 1.0;
    let mut sum = integral;

    for n in 1..SERIES_TERMS {
        let two_n = 2.0 * n as f64;
        let ratio = (two_n - 1.0) / two_n;
        integral = integral.scale(ratio) - (cos_phi * sin_pow).scale(1.0 / two_n);
        sin_pow = sin_pow * sin_sq;
        weight *= ratio * k_sq;
        sum = sum + integral.scale(weight);
    }
    sum
}

/// Complete integral `K(k) = F(pi/2 | k)`.
pub fn complete_k(k: f64) -> f64 {
    elliptic_f(Complex::from(std::f64::consts::FRAC_PI_2), k).re
}
