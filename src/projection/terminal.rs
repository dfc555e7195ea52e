//! Terminal value at the end of the holding period

use super::mortgage::{Loan, MONTHS_PER_YEAR};
use super::HORIZON_YEARS;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Outcome of selling the property at the end of year 10
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalValue {
    /// Appreciated sale price
    pub sale_price: f64,
    /// Loan principal still owed at sale
    pub remaining_balance: f64,
    /// Sale price less the loan payoff
    pub sale_profit: f64,
}

/// Property value after compounding appreciation over the holding period
pub fn sale_price_at_horizon(purchase_price: f64, appreciation_rate: f64) -> f64 {
    purchase_price * (1.0 + appreciation_rate).powi(HORIZON_YEARS as i32)
}

/// Sale price, loan payoff and resulting profit at the horizon
pub fn terminal_value(
    loan: &Loan,
    purchase_price: f64,
    appreciation_rate: f64,
) -> Result<TerminalValue> {
    let sale_price = sale_price_at_horizon(purchase_price, appreciation_rate);
    let months_held = HORIZON_YEARS as u32 * MONTHS_PER_YEAR;
    let remaining_balance = loan.remaining_balance(months_held.min(loan.term_months))?;

    Ok(TerminalValue {
        sale_price,
        remaining_balance,
        sale_profit: sale_price - remaining_balance,
    })
}
