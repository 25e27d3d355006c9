//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Keeps a bracket `[b, c]` with `f(b)` and `f(c)` of opposite sign and, on
/// every iteration, tries inverse quadratic interpolation (or a secant step
/// when only two distinct points are known). A step is rejected in favour of
/// bisection when it would leave the bracket or shrinks it too slowly, so the
/// method converges whenever `f` is continuous on a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use impvol_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((root - 1.521_379_706_804_567_6).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// The endpoints may be given in either order. An endpoint where `f` is
    /// exactly zero is returned without iterating.
    ///
    /// Convergence is judged on `x` only: the size of `f` says nothing about
    /// how close a root is when `f` itself is tiny.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - `x` with `f(x) == 0`, or the best end of a bracket shrunk
    ///   to `tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::NumericalInstability)` - `f` returned NaN or infinity
    ///
    /// # Example
    ///
    /// ```
    /// use impvol_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    ///
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
    ///
    /// // x² + 1 has no real root
    /// assert!(solver.find_root(|x: f64| x * x + 1.0, -1.0, 1.0).is_err());
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let one = T::one();
        let two = one + one;
        let three = two + one;
        let half = one / two;
        let tol = self.config.tolerance;

        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if !fa.is_finite() {
            return Err(non_finite_err(a, fa));
        }
        if !fb.is_finite() {
            return Err(non_finite_err(b, fb));
        }

        if fa == zero {
            return Ok(a);
        }
        if fb == zero {
            return Ok(b);
        }

        if (fa > zero) == (fb > zero) {
            return Err(SolverError::NoBracket {
                a: to_f64(a),
                b: to_f64(b),
            });
        }

        // c is the contrapoint of b; d is the last step, e the one before it
        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            if (fb > zero) == (fc > zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // b is always the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let m = half * (c - b);

            if fb == zero || m.abs() <= tol1 {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant
                    (two * m * s, one - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - one)),
                        (q - one) * (r - one) * (s - one),
                    )
                };

                if p > zero {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * m * q - (tol1 * q).abs();
                let min2 = (e * q).abs();

                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;

            b = if d.abs() > tol1 {
                b + d
            } else if m > zero {
                b + tol1
            } else {
                b - tol1
            };

            fb = f(b);
            if !fb.is_finite() {
                return Err(non_finite_err(b, fb));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

fn non_finite_err<T: Float>(x: T, fx: T) -> SolverError {
    SolverError::NumericalInstability(format!(
        "objective is not finite: f({}) = {}",
        to_f64(x),
        to_f64(fx)
    ))
}
