//! Brent's method over a fallible objective.

use super::SolverConfig;
use crate::error::CalibrationError;

/// Brent's method root finder.
///
/// Combines bisection, the secant method, and inverse quadratic
/// interpolation, falling back to bisection whenever an interpolated step
/// would be unreliable. Requires a bracket on which the objective changes
/// sign; no derivatives are needed, which suits a Monte Carlo objective
/// whose noisy values make finite differences worthless.
///
/// The objective is fallible: any error it returns aborts the search and
/// propagates unchanged.
///
/// # Example
///
/// ```
/// use autocall_optimiser::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig { tolerance: 1e-10, max_iterations: 100 });
///
/// // Solve x³ - x - 2 = 0 in the bracket [1, 2].
/// let root = solver
///     .find_root(|x| Ok(x * x * x - x - 2.0), 1.0, 2.0)
///     .unwrap();
/// assert!((root * root * root - root - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BrentSolver {
    /// Solver configuration.
    config: SolverConfig,
}

impl BrentSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Creates a solver with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a root of `f` in the bracket `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::InvalidBracket`] if the endpoints are
    ///   non-finite or coincide
    /// - [`CalibrationError::NoBracket`] if `f(lo)` and `f(hi)` share a sign
    /// - [`CalibrationError::MaxIterations`] if convergence is not reached
    /// - any error returned by the objective, unchanged
    pub fn find_root<F>(&self, mut f: F, lo: f64, hi: f64) -> Result<f64, CalibrationError>
    where
        F: FnMut(f64) -> Result<f64, CalibrationError>,
    {
        if !(lo.is_finite() && hi.is_finite()) || lo == hi {
            return Err(CalibrationError::InvalidBracket { lo, hi });
        }

        let mut a = lo;
        let mut b = hi;
        let mut fa = f(a)?;
        let mut fb = f(b)?;

        if fa * fb > 0.0 {
            return Err(CalibrationError::NoBracket {
                lo,
                hi,
                f_lo: fa,
                f_hi: fb,
            });
        }

        // Work with |f(a)| >= |f(b)| so b is the better estimate.
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        let tol = self.config.tolerance;

        for _ in 0..self.config.max_iterations {
            if fb.abs() < tol {
                return Ok(b);
            }

            let m = (c - b) / 2.0;
            if m.abs() <= tol {
                return Ok(b);
            }

            let use_bisection;
            if fa != fc && fb != fc {
                // Inverse quadratic interpolation.
                let r = fb / fc;
                let s = fb / fa;
                let t = fa / fc;
                let p = s * (t * (r - t) * (c - b) - (1.0 - r) * (b - a));
                let q = (t - 1.0) * (r - 1.0) * (s - 1.0);

                if p.abs() < (3.0 * m * q).abs() / 2.0 && p.abs() < (e * q).abs() / 2.0 {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else if fb != fa {
                // Secant step.
                let s = fb / fa;
                let p = 2.0 * m * s;
                let q = 1.0 - s;

                if p.abs() < (3.0 * m * q).abs() / 2.0 && p.abs() < (e * q).abs() / 2.0 {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else {
                use_bisection = true;
            }

            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            if d.abs() > tol {
                b += d;
            } else {
                // Minimum step towards the midpoint.
                b += if m > 0.0 { tol } else { -tol };
            }

            fb = f(b)?;

            // Restore the sign change between b and c.
            if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // Keep |f(c)| >= |f(b)|.
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        Err(CalibrationError::MaxIterations {
            iterations: self.config.max_iterations,
        })
    }
}
