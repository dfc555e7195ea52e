//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson from an initial guess, falling back to bisection over a
//! fixed bracket. Both are bounded by an iteration cap and tolerance, so a
//! stream without a root yields [`EvaluationError::UndefinedIrr`] instead of
//! looping or returning NaN.

use super::discount::npv_at_rate;
use crate::error::{EvaluationError, Result};
use log::warn;

/// Solver bounds and tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrConfig {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    /// Lowest rate searched (-99%)
    pub lower_bound: f64,
    /// Highest rate searched (1000%)
    pub upper_bound: f64,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-10,
            max_iterations: 1000,
            lower_bound: -0.99,
            upper_bound: 10.0,
        }
    }
}

/// Rate at which the NPV of `cashflows` (first entry at t = 0) is zero
///
/// # Arguments
/// * `cashflows` - Periodic cash flows (positive = inflow, negative = outflow)
/// * `config` - Iteration cap, tolerance and search bracket
pub fn calculate_irr(cashflows: &[f64], config: &IrrConfig) -> Result<f64> {
    if cashflows.is_empty() {
        return Err(undefined("cashflow sequence is empty"));
    }

    if cashflows.iter().any(|cf| !cf.is_finite()) {
        return Err(EvaluationError::degenerate(
            "irr",
            "cashflow sequence contains a non-finite value",
        ));
    }

    // At least one sign change is required for a root to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return Err(undefined("cashflows never change sign"));
    }

    let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();
    let residual_limit = scale * 1e-9;

    let mut rate = config.initial_guess;
    for _ in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            // Derivative too small, try bisection instead
            break;
        }

        let new_rate = (rate - npv / dnpv).clamp(config.lower_bound, config.upper_bound);

        if (new_rate - rate).abs() < config.tolerance {
            if npv_at_rate(cashflows, new_rate).abs() <= residual_limit {
                return Ok(new_rate);
            }
            // Stalled against a bound without reaching a root
            break;
        }

        rate = new_rate;
    }

    warn!("Newton-Raphson did not converge on IRR, falling back to bisection");
    calculate_irr_bisection(cashflows, config)
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection method
fn calculate_irr_bisection(cashflows: &[f64], config: &IrrConfig) -> Result<f64> {
    let mut low = config.lower_bound;
    let mut high = config.upper_bound;
    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // Check that we have a root in this interval
    if npv_low * npv_high > 0.0 {
        return Err(undefined(format!(
            "no root between {} and {}",
            config.lower_bound, config.upper_bound
        )));
    }

    for _ in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < config.tolerance || (high - low) / 2.0 < config.tolerance {
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(undefined(format!(
        "bisection did not converge within {} iterations",
        config.max_iterations
    )))
}

fn undefined(reason: impl Into<String>) -> EvaluationError {
    EvaluationError::UndefinedIrr {
        reason: reason.into(),
    }
}
