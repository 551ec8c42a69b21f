//! Scalar root-finding used to close up parametric geometry.
//!
//! Recipes receive the solver as a collaborator; the kernel only depends on
//! the [`RootFinder`] contract: return `x` with `|f(x)| < ftol` or a final
//! step `|Δx| < xtol`, deterministically for identical inputs.
use tracing::debug;

use crate::error::{OperationError, Result};

/// Solves `f(x) = 0` starting from `x0`.
pub trait RootFinder {
    /// Returns a root of `f` near `x0`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f` and returns
    /// [`OperationError::NoConvergence`] when the iteration budget runs out.
    fn solve<F>(&self, f: F, x0: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>;
}

/// Secant iteration seeded with `x0` and `x0 + step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Secant {
    pub ftol: f64,
    pub xtol: f64,
    pub max_iterations: usize,
    /// Relative size of the second seed (absolute when `x0 == 0`).
    pub step: f64,
}

impl Default for Secant {
    fn default() -> Self {
        Self {
            ftol: 1e-12,
            xtol: 1e-12,
            max_iterations: 100,
            step: 1e-4,
        }
    }
}

impl Secant {
    /// Creates a secant solver with explicit tolerances.
    #[must_use]
    pub fn new(ftol: f64, xtol: f64) -> Self {
        Self {
            ftol,
            xtol,
            ..Self::default()
        }
    }
}

impl RootFinder for Secant {
    fn solve<F>(&self, mut f: F, x0: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let mut x_prev = x0;
        let mut f_prev = f(x_prev)?;
        if f_prev.abs() < self.ftol {
            return Ok(x_prev);
        }
        let mut x = if x0 == 0.0 {
            self.step
        } else {
            x0 * (1.0 + self.step)
        };
        for iteration in 0..self.max_iterations {
            let fx = f(x)?;
            if !fx.is_finite() {
                return Err(OperationError::Failed(format!("f({x}) is not finite")).into());
            }
            if fx.abs() < self.ftol {
                debug!(iteration, x, "secant converged on residual");
                return Ok(x);
            }
            let slope = (fx - f_prev) / (x - x_prev);
            if slope == 0.0 || !slope.is_finite() {
                return Err(OperationError::Failed(format!("flat secant at x = {x}")).into());
            }
            let next = x - fx / slope;
            if (next - x).abs() < self.xtol {
                debug!(iteration, x = next, "secant converged on step");
                return Ok(next);
            }
            x_prev = x;
            f_prev = fx;
            x = next;
        }
        Err(OperationError::NoConvergence {
            iterations: self.max_iterations,
            last: x,
        }
        .into())
    }
}

/// Newton iteration with a central-difference derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Newton {
    pub ftol: f64,
    pub xtol: f64,
    pub max_iterations: usize,
    /// Half-width of the difference stencil.
    pub h: f64,
}

impl Default for Newton {
    fn default() -> Self {
        Self {
            ftol: 1e-12,
            xtol: 1e-12,
            max_iterations: 100,
            h: 1e-6,
        }
    }
}

impl RootFinder for Newton {
    fn solve<F>(&self, mut f: F, x0: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let mut x = x0;
        for iteration in 0..self.max_iterations {
            let fx = f(x)?;
            if fx.abs() < self.ftol {
                debug!(iteration, x, "newton converged on residual");
                return Ok(x);
            }
            let derivative = (f(x + self.h)? - f(x - self.h)?) / (2.0 * self.h);
            if derivative == 0.0 || !derivative.is_finite() {
                return Err(OperationError::Failed(format!("zero derivative at x = {x}")).into());
            }
            let next = x - fx / derivative;
            if (next - x).abs() < self.xtol {
                debug!(iteration, x = next, "newton converged on step");
                return Ok(next);
            }
            x = next;
        }
        Err(OperationError::NoConvergence {
            iterations: self.max_iterations,
            last: x,
        }
        .into())
    }
}
