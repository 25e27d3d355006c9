//! End-to-end scenarios for pricing, inversion and batch filtering.
//!
//! # Test Categories
//!
//! 1. **Reference values**: S=100, K=100, T=1, r=5%, σ=20%
//! 2. **Boundaries**: degenerate inputs and unreachable prices
//! 3. **Chains**: mixed valid and invalid quotes through the batch API

use approx::assert_relative_eq;
use impvol_core::types::PricingError;
use impvol_models::analytical::{price, AnalyticalError, BlackScholes};
use impvol_models::implied::{
    implied_volatility, solve_and_filter, ImpliedVolError, ImpliedVolSolver, ParallelConfig,
    VolBand,
};
use impvol_models::instruments::{OptionQuote, OptionType};

/// S, K, T, r, σ
fn reference_params() -> (f64, f64, f64, f64, f64) {
    (100.0, 100.0, 1.0, 0.05, 0.2)
}

// ============================================================================
// Reference Values
// ============================================================================

#[test]
fn test_reference_call_and_put_prices() {
    let (s, k, t, r, v) = reference_params();
    let call = price(OptionType::Call, s, k, t, r, v).unwrap();
    let put = price(OptionType::Put, s, k, t, r, v).unwrap();

    assert_relative_eq!(call, 10.4506, epsilon = 1e-4);
    assert_relative_eq!(put, 5.5735, epsilon = 1e-4);
    assert_relative_eq!(call - put, s - k * (-r * t).exp(), epsilon = 1e-8);
}

#[test]
fn test_reference_market_price_solves_to_twenty_percent() {
    let (s, k, t, r, _) = reference_params();
    let vol = implied_volatility(OptionType::Call, 10.4506, s, k, t, r).unwrap();
    assert_relative_eq!(vol, 0.2, epsilon = 1e-4);
}

#[test]
fn test_struct_and_free_function_agree() {
    let (s, k, t, r, v) = reference_params();
    let bs = BlackScholes::new(s, r, v).unwrap();
    assert_eq!(
        bs.price_put(k, t).unwrap(),
        price(OptionType::Put, s, k, t, r, v).unwrap()
    );
}

#[test]
fn test_deep_otm_short_dated_put_solves_near_lower_bracket() {
    // Two-and-a-half weeks to expiry, 20% out of the money, quoted at 0.001
    let vol = implied_volatility(OptionType::Put, 0.001, 100.0, 80.0, 0.05, 0.05).unwrap();
    assert!(vol > 1e-6 && vol < 0.5, "vol = {}", vol);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_boundary_inputs_are_invalid() {
    let expired = implied_volatility(OptionType::Call, 10.0, 100.0, 100.0, 0.0, 0.05);
    assert!(matches!(
        expired,
        Err(ImpliedVolError::InvalidInput(AnalyticalError::InvalidExpiry { .. }))
    ));

    let no_spot = implied_volatility(OptionType::Call, 10.0, 0.0, 100.0, 1.0, 0.05);
    assert!(matches!(
        no_spot,
        Err(ImpliedVolError::InvalidInput(AnalyticalError::InvalidSpot { .. }))
    ));

    let negative_strike = implied_volatility(OptionType::Put, 10.0, 100.0, -100.0, 1.0, 0.05);
    assert!(matches!(
        negative_strike,
        Err(ImpliedVolError::InvalidInput(AnalyticalError::InvalidStrike { .. }))
    ));
}

#[test]
fn test_pricer_rejects_zero_volatility_and_expiry() {
    assert!(matches!(
        price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.0),
        Err(AnalyticalError::InvalidVolatility { .. })
    ));
    assert!(matches!(
        price(OptionType::Call, 100.0, 100.0, 0.0, 0.05, 0.2),
        Err(AnalyticalError::InvalidExpiry { .. })
    ));
}

#[test]
fn test_price_above_maximum_has_no_bracket() {
    let max_price = price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 5.0).unwrap();
    let result = implied_volatility(OptionType::Call, max_price + 10.0, 100.0, 100.0, 1.0, 0.05);

    let err = result.unwrap_err();
    assert!(matches!(err, ImpliedVolError::NoBracket { .. }));
    assert!(matches!(
        PricingError::from(err),
        PricingError::ModelFailure(_)
    ));
}

// ============================================================================
// Chains
// ============================================================================

#[test]
fn test_chain_with_bad_rows_keeps_good_rows() {
    let vols = [0.18, 0.22, 0.25, 0.3, 0.35];
    let strikes = [90.0, 95.0, 100.0, 105.0, 110.0];

    let mut quotes: Vec<OptionQuote> = strikes
        .iter()
        .zip(vols.iter())
        .map(|(&k, &v)| {
            let p = price(OptionType::Call, 100.0, k, 0.5, 0.05, v).unwrap();
            OptionQuote::new(OptionType::Call, k, 100.0, 0.5, 0.05, p)
        })
        .collect();
    quotes.insert(2, OptionQuote::new(OptionType::Call, 100.0, 100.0, 0.5, 0.05, 0.0));
    quotes.push(OptionQuote::new(OptionType::Put, 100.0, 100.0, 0.5, 0.05, 500.0));

    let report = solve_and_filter(
        &ImpliedVolSolver::with_defaults(),
        &quotes,
        VolBand::default(),
        &ParallelConfig::new(2),
    );

    assert_eq!(report.points.len(), 5);
    for (point, expected) in report.points.iter().zip(vols.iter()) {
        assert_relative_eq!(point.implied_vol, *expected, epsilon = 1e-6);
    }
    let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![2, 6]);
    assert_eq!(report.out_of_band, 0);
}
