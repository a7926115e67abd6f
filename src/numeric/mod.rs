//! Projection-agnostic numerical primitives: quadrature, ODE marching,
//! Newton–Raphson root finding, table interpolation and the complex
//! arithmetic used by the elliptic-integral projections.
//!
//! Every function here is pure. Iterative solvers signal non-convergence with
//! `None` instead of panicking; callers turn that into a NaN point.

pub mod complex;
pub mod elliptic;
pub mod interpolate;
pub mod newton;
pub mod quadrature;

pub use complex::Complex;
pub use elliptic::elliptic_f;
pub use interpolate::{aitken_interpolate, lin_interp};
pub use newton::{newton_raphson_1d, newton_raphson_2d, MAX_ITERATIONS};
pub use quadrature::{integrate, solve_ode};

use num_traits::Float;

/// Convert an `f64` literal into the working float type.
#[inline]
pub(crate) fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}
