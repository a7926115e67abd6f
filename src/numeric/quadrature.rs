//! Fixed-step Simpson quadrature and the cumulative ODE solver built on it.

use num_traits::Float;

use super::lit;

/// Simpson panel over `[t0, t1]`.
#[inline]
fn simpson_panel<T: Float, F: Fn(T) -> T>(f: &F, t0: T, t1: T) -> T {
    let h = t1 - t0;
    h / lit(6.0) * (f(t0) + lit::<T>(4.0) * f((t0 + t1) / lit(2.0)) + f(t1))
}

/// Definite integral of `f` over `[a, b]` by composite Simpson's rule with a
/// constant step. The last panel is shrunk so it ends exactly on `b`.
///
/// Requires `b > a` and `step > 0`; otherwise the integral is empty and 0 is
/// returned.
pub fn integrate<T, F>(a: T, b: T, f: F, step: T) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    if !(b > a) || !(step > T::zero()) {
        return T::zero();
    }
    let panels = match ((b - a) / step).ceil().to_usize() {
        Some(n) => n.max(1),
        None => return T::nan(),
    };

    let mut sum = T::zero();
    for i in 0..panels {
        let t0 = a + step * lit(i as f64);
        let t1 = if i + 1 == panels {
            b
        } else {
            (a + step * lit((i + 1) as f64)).min(b)
        };
        sum = sum + simpson_panel(&f, t0, t1);
    }
    sum
}

/// Cumulative integral of `f` sampled at `t = i*t_max/n` for `i = 0..=n`.
///
/// Between samples the integral is marched forward in Simpson panels no wider
/// than `step`. A non-positive `step` falls back to one panel per sample. The
/// output is non-decreasing whenever `f` is non-negative.
pub fn solve_ode<T, F>(t_max: T, n: usize, f: F, step: T) -> Vec<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    let mut y = Vec::with_capacity(n + 1);
    y.push(T::zero());
    if n == 0 {
        return y;
    }
    let step = if step > T::zero() {
        step
    } else {
        t_max / lit(n as f64)
    };

    let mut t = T::zero();
    let mut sum = T::zero();
    for i in 1..=n {
        let t_i = t_max * lit(i as f64) / lit(n as f64);
        while t < t_i {
            let next = (t + step).min(t_i);
            sum = sum + simpson_panel(&f, t, next);
            t = next;
        }
        y.push(sum);
    }
    y
}
