//! Bounded Newton–Raphson solvers in one and two unknowns.

/// Hard cap on Newton steps for every solver in this module.
pub const MAX_ITERATIONS: usize = 8;

/// Solve `f(x) = target` starting at `x0`.
///
/// Returns `None` when the residual is still above `tol` after
/// [`MAX_ITERATIONS`] steps, or when the iteration runs into a non-finite
/// value. A residual exactly equal to `tol` counts as converged.
pub fn newton_raphson_1d<F, D>(target: f64, x0: f64, f: F, df: D, tol: f64) -> Option<f64>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut residual = f(x) - target;
    for _ in 0..MAX_ITERATIONS {
        if residual.abs() <= tol {
            break;
        }
        x -= residual / df(x);
        residual = f(x) - target;
    }
    (residual.abs() <= tol && x.is_finite()).then_some(x)
}

/// Solve `f(phi, lam) = target` for two unknowns.
///
/// `f` returns both components of the system, `jacobian` returns
/// `[[df1/dphi, df1/dlam], [df2/dphi, df2/dlam]]`. Each step solves the 2×2
/// linear system by Cramer's rule; a singular Jacobian aborts with `None`.
/// Convergence is judged on the Euclidean norm of the residual.
pub fn newton_raphson_2d<F, J>(
    target: (f64, f64),
    guess: (f64, f64),
    f: F,
    jacobian: J,
    tol: f64,
) -> Option<(f64, f64)>
where
    F: Fn(f64, f64) -> (f64, f64),
    J: Fn(f64, f64) -> [[f64; 2]; 2],
{
    let (mut phi, mut lam) = guess;
    let residual = |phi: f64, lam: f64| {
        let (f1, f2) = f(phi, lam);
        (f1 - target.0, f2 - target.1)
    };

    let (mut r1, mut r2) = residual(phi, lam);
    for _ in 0..MAX_ITERATIONS {
        if r1.hypot(r2) <= tol {
            break;
        }
        let [[a, b], [c, d]] = jacobian(phi, lam);
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        phi -= (r1 * d - r2 * b) / det;
        lam -= (r2 * a - r1 * c) / det;
        (r1, r2) = residual(phi, lam);
    }

    (r1.hypot(r2) <= tol && phi.is_finite() && lam.is_finite()).then_some((phi, lam))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    #[test]
    fn test_1d_square_root() {
        let x = newton_raphson_1d(2.0, 1.0, |x| x * x, |x| 2.0 * x, 1e-12).unwrap();
        assert_relative_eq!(x, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_1d_iteration_cap() {
        let evals = Cell::new(0usize);
        // atan from far away diverges; the solver must give up after the cap
        let out = newton_raphson_1d(
            0.0,
            3.0,
            |x: f64| {
                evals.set(evals.get() + 1);
                x.atan()
            },
            |x| 1.0 / (1.0 + x * x),
            1e-12,
        );
        assert!(out.is_none());
        assert!(evals.get() <= MAX_ITERATIONS + 1);
    }

    #[test]
    fn test_1d_target_outside_range() {
        let evals = Cell::new(0usize);
        // sin never reaches 2
        let out = newton_raphson_1d(
            2.0,
            0.3,
            |x: f64| {
                evals.set(evals.get() + 1);
                x.sin()
            },
            |x| x.cos(),
            1e-10,
        );
        assert!(out.is_none());
        assert!(evals.get() <= MAX_ITERATIONS + 1);
    }

    #[test]
    fn test_1d_residual_equal_to_tol_converges() {
        let out = newton_raphson_1d(0.0, 0.5, |x| x, |_| 1.0, 0.5);
        assert_eq!(out, Some(0.5));
    }

    #[test]
    fn test_2d_linear_system() {
        // x + y = 3, x - y = 1
        let out = newton_raphson_2d(
            (3.0, 1.0),
            (0.0, 0.0),
            |p, l| (p + l, p - l),
            |_, _| [[1.0, 1.0], [1.0, -1.0]],
            1e-12,
        )
        .unwrap();
        assert_relative_eq!(out.0, 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_2d_nonlinear() {
        let out = newton_raphson_2d(
            (1.0, 0.0),
            (0.6, 0.8),
            |p, l| (p * p + l * l, p - l * l * l),
            |p, l| [[2.0 * p, 2.0 * l], [1.0, -3.0 * l * l]],
            1e-12,
        )
        .unwrap();
        assert_relative_eq!(out.0 * out.0 + out.1 * out.1, 1.0, epsilon = 1e-10);
        assert_relative_eq!(out.0, out.1.powi(3), epsilon = 1e-10);
    }

    #[test]
    fn test_2d_target_outside_range() {
        let evals = Cell::new(0usize);
        let out = newton_raphson_2d(
            (5.0, 5.0),
            (0.2, -0.4),
            |p: f64, l: f64| {
                evals.set(evals.get() + 1);
                (p.sin(), l.sin())
            },
            |p, l| [[p.cos(), 0.0], [0.0, l.cos()]],
            1e-10,
        );
        assert!(out.is_none());
        assert!(evals.get() <= MAX_ITERATIONS + 1);
    }

    #[test]
    fn test_2d_singular_jacobian() {
        let out = newton_raphson_2d(
            (1.0, 1.0),
            (0.0, 0.0),
            |p, l| (p + l, p + l),
            |_, _| [[1.0, 1.0], [1.0, 1.0]],
            1e-12,
        );
        assert!(out.is_none());
    }
}
