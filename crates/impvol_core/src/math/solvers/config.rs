//! Solver configuration types.

use num_traits::Float;

/// Stopping rules shared by the root finders.
///
/// `tolerance` is an absolute tolerance on `x`: bracketing solvers stop once
/// the bracket half-width drops below roughly `tolerance / 2`.
/// `max_iterations` bounds the work per solve and acts
/// as the only timeout a solve has.
///
/// # Example
///
/// ```
/// use impvol_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// // A looser target for bulk option-chain work
/// let loose = SolverConfig::new(1e-6, 60);
/// assert!(loose.tolerance > config.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Absolute convergence tolerance on the bracket width.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Tolerance `1e-10`, at most 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Tight tolerance (1e-14) with a 500 iteration budget.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) with a 50 iteration budget.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_presets_ordering() {
        let precise: SolverConfig<f64> = SolverConfig::high_precision();
        let default: SolverConfig<f64> = SolverConfig::default();
        let fast: SolverConfig<f64> = SolverConfig::fast();

        assert!(precise.tolerance < default.tolerance);
        assert!(default.tolerance < fast.tolerance);
        assert!(precise.max_iterations > fast.max_iterations);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 100);
    }
}
