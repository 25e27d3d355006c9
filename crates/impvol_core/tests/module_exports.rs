//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported and
//! accessible via absolute paths.

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solvers_module_exports() {
    use impvol_core::math::solvers::BrentSolver;
    use impvol_core::math::solvers::SolverConfig;

    let solver = BrentSolver::new(SolverConfig::<f64>::fast());
    let root = solver.find_root(|x| x * x - 4.0, 0.0, 5.0).unwrap();
    assert!((root - 2.0).abs() < 1e-6);
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use impvol_core::types::time::time_to_expiry;
    use impvol_core::types::time::Date;
    use impvol_core::types::time::DayCountConvention;

    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let end = Date::from_ymd(2024, 7, 1).unwrap();

    assert_eq!(end - start, 182);
    assert_eq!(
        "ACT/360".parse::<DayCountConvention>(),
        Ok(DayCountConvention::ActualActual360)
    );

    let yf = DayCountConvention::ActualActual365.year_fraction(start, end);
    assert!((yf - 0.4986).abs() < 0.001);
    assert_eq!(time_to_expiry(start, end), yf);
}

/// Test that error types are accessible via absolute path.
#[test]
fn test_error_module_exports() {
    use impvol_core::types::error::{DateError, PricingError, SolverError};

    let date_err = DateError::InvalidDate {
        year: 2024,
        month: 13,
        day: 1,
    };
    assert!(date_err.to_string().contains("2024-13-1"));

    let pricing = PricingError::ModelFailure("no root".to_string());
    assert_eq!(pricing.to_string(), "Model failure: no root");

    let solver = SolverError::NoBracket { a: 0.0, b: 1.0 };
    assert!(solver.to_string().starts_with("No bracket"));
}

/// Test re-exports at the module level.
#[test]
fn test_module_level_reexports() {
    use impvol_core::types::{time_to_expiry, Date, DayCountConvention, SolverError};

    let valuation: Date = "2025-01-10".parse().unwrap();
    let expiry: Date = "2025-01-17".parse().unwrap();
    assert!((time_to_expiry(valuation, expiry) - 7.0 / 365.0).abs() < 1e-15);

    assert_eq!(DayCountConvention::default().to_string(), "ACT/365");

    let err = SolverError::MaxIterationsExceeded { iterations: 5 };
    assert!(err.to_string().contains("5 iterations"));
}

/// Test that the solver surfaces a bracket failure through the public API.
#[test]
fn test_solver_error_through_public_api() {
    use impvol_core::math::solvers::BrentSolver;
    use impvol_core::types::SolverError;

    let solver: BrentSolver<f64> = BrentSolver::with_defaults();
    let result = solver.find_root(|x| x * x + 1.0, -1.0, 1.0);
    assert_eq!(
        result,
        Err(SolverError::NoBracket { a: -1.0, b: 1.0 })
    );
}
