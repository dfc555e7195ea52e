//! Evaluation output structures

use super::outlay::InitialOutlay;
use super::terminal::TerminalValue;
use super::{AnnualSeries, CashflowSequence};
use serde::{Deserialize, Serialize};

/// One year of the operating cashflow table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    /// Holding year (1-indexed)
    pub year: u32,
    pub rent: f64,
    pub mortgage_payment: f64,
    pub fixed_costs: f64,
    pub variable_costs: f64,
    pub total_expenses: f64,
    /// Net cashflow, including sale profit in the final year
    pub operating_cashflow: f64,
}

/// Full-precision result of evaluating one property.
///
/// Costs are negative, income positive. Nothing here is rounded; use
/// [`Evaluation::to_bundle`] for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rents: AnnualSeries,
    pub terminal: TerminalValue,
    pub mortgage_payments: AnnualSeries,
    pub fixed_costs: AnnualSeries,
    pub variable_costs: AnnualSeries,
    pub total_expenses: AnnualSeries,
    /// Years 1-10, year 10 including sale profit
    pub operating_cashflow: AnnualSeries,
    /// Operating cashflows discounted from the end of each year
    pub present_value: f64,
    pub outlay: InitialOutlay,
    pub net_present_value: f64,
    /// Year 0 (negative outlay) followed by years 1-10
    pub full_cashflow_sequence: CashflowSequence,
    /// None when no rate zeroes the NPV
    pub irr: Option<f64>,
}

impl Evaluation {
    pub fn sale_profit(&self) -> f64 {
        self.terminal.sale_profit
    }

    pub fn initial_outlay(&self) -> f64 {
        self.outlay.total()
    }

    /// Per-year table rows
    pub fn rows(&self) -> Vec<CashflowRow> {
        (0..self.rents.len())
            .map(|i| CashflowRow {
                year: i as u32 + 1,
                rent: self.rents[i],
                mortgage_payment: self.mortgage_payments[i],
                fixed_costs: self.fixed_costs[i],
                variable_costs: self.variable_costs[i],
                total_expenses: self.total_expenses[i],
                operating_cashflow: self.operating_cashflow[i],
            })
            .collect()
    }

    /// Output bundle with every figure rounded to cents
    pub fn to_bundle(&self) -> ResultBundle {
        ResultBundle {
            rents: self.rents.map(round2),
            sale_profit: round2(self.sale_profit()),
            mortgage_payments: self.mortgage_payments.map(round2),
            fixed_costs: self.fixed_costs.map(round2),
            variable_costs: self.variable_costs.map(round2),
            total_expenses: self.total_expenses.map(round2),
            operating_cashflow: self.operating_cashflow.map(round2),
            present_value: round2(self.present_value),
            initial_outlay: round2(self.initial_outlay()),
            net_present_value: round2(self.net_present_value),
            full_cashflow_sequence: self.full_cashflow_sequence.map(round2),
            irr: self.irr.map(round2),
        }
    }
}

/// Rounded evaluation result handed to front ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub rents: AnnualSeries,
    pub sale_profit: f64,
    pub mortgage_payments: AnnualSeries,
    pub fixed_costs: AnnualSeries,
    pub variable_costs: AnnualSeries,
    pub total_expenses: AnnualSeries,
    pub operating_cashflow: AnnualSeries,
    pub present_value: f64,
    pub initial_outlay: f64,
    pub net_present_value: f64,
    pub full_cashflow_sequence: CashflowSequence,
    pub irr: Option<f64>,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(83_767.499_9), 83_767.5);
        assert_eq!(round2(-1_413.641_477), -1_413.64);
        assert_eq!(round2(0.630_205), 0.63);
        assert_eq!(round2(0.0), 0.0);
    }
}
