//! Fixed-rate mortgage: level debt service and principal amortization
//!
//! Payments follow the cashflow sign convention used throughout the crate:
//! money leaving the owner is negative. A monthly payment on a $256k loan is
//! therefore about -1413.64, and each principal posting is negative too.

use super::{AnnualSeries, HORIZON_YEARS};
use crate::error::{EvaluationError, Result};

/// Amortization term of the modeled mortgage (30 years)
pub const AMORTIZATION_MONTHS: u32 = 360;

/// Down payment at or above which no mortgage insurance is charged
pub const MORTGAGE_INSURANCE_THRESHOLD: f64 = 0.20;

pub const MONTHS_PER_YEAR: u32 = 12;

/// A level-payment loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loan {
    /// Amount borrowed
    pub principal: f64,
    /// Annual nominal interest rate, compounded monthly
    pub annual_rate: f64,
    /// Number of monthly payments
    pub term_months: u32,
}

impl Loan {
    /// Loan financing `price` after a down payment of `down_payment_fraction`
    pub fn from_purchase(price: f64, down_payment_fraction: f64, annual_rate: f64) -> Self {
        Self {
            principal: price * (1.0 - down_payment_fraction),
            annual_rate,
            term_months: AMORTIZATION_MONTHS,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / MONTHS_PER_YEAR as f64
    }

    /// Level monthly payment (principal + interest), cost-signed
    pub fn monthly_payment(&self) -> Result<f64> {
        if self.term_months == 0 {
            return Err(EvaluationError::degenerate(
                "mortgage payment",
                "amortization term has zero months",
            ));
        }

        let n = self.term_months as f64;
        let r = self.monthly_rate();
        let payment = if r.abs() < 1e-12 {
            -self.principal / n
        } else {
            -self.principal * r / (1.0 - (1.0 + r).powf(-n))
        };

        finite("mortgage payment", payment)
    }

    /// Balance outstanding after `months` payments
    fn balance_after(&self, months: u32, payment: f64) -> f64 {
        let r = self.monthly_rate();
        let k = months as f64;
        if r.abs() < 1e-12 {
            return self.principal + payment * k;
        }
        let growth = (1.0 + r).powf(k);
        self.principal * growth + payment * (growth - 1.0) / r
    }

    /// Principal portion of payment number `month` (1-based), cost-signed
    pub fn principal_payment(&self, month: u32) -> Result<f64> {
        if month == 0 || month > self.term_months {
            return Err(EvaluationError::degenerate(
                "principal payment",
                format!("month {} outside 1..={}", month, self.term_months),
            ));
        }

        let payment = self.monthly_payment()?;
        let interest = -self.balance_after(month - 1, payment) * self.monthly_rate();
        finite("principal payment", payment - interest)
    }

    /// Loan balance after posting the first `months` principal payments.
    ///
    /// Postings are summed month by month, so the balance is the starting
    /// principal plus the (negative) cumulative principal paid.
    pub fn remaining_balance(&self, months: u32) -> Result<f64> {
        let mut cumulative_principal = 0.0;
        for month in 1..=months {
            cumulative_principal += self.principal_payment(month)?;
        }
        finite("remaining balance", self.principal + cumulative_principal)
    }
}

/// Annual debt service for each year of the holding period, cost-signed.
///
/// Below a 20% down payment the monthly insurance premium is added to the
/// cost of each payment before annualizing. The figure is level across all
/// years since the fixed-rate payment never resets.
pub fn annual_debt_service(
    loan: &Loan,
    down_payment_fraction: f64,
    monthly_insurance: f64,
) -> Result<AnnualSeries> {
    let mut monthly = loan.monthly_payment()?;
    if down_payment_fraction < MORTGAGE_INSURANCE_THRESHOLD {
        monthly -= monthly_insurance;
    }
    Ok([monthly * MONTHS_PER_YEAR as f64; HORIZON_YEARS])
}

fn finite(stage: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::degenerate(stage, format!("result is {}", value)))
    }
}
