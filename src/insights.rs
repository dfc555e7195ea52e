//! Headline figures derived from an evaluation
//!
//! These are the secondary numbers a reader looks at next to NPV and IRR:
//! how much cash goes in, what a month looks like, and how busy the
//! property must be to cover its fixed obligations.

use crate::assumptions::Assumptions;
use crate::projection::{round2, Evaluation, MONTHS_PER_YEAR, NIGHTS_PER_YEAR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyInsights {
    /// Booked months per year implied by the occupancy rate
    pub occupied_months: f64,
    /// Occupancy needed for year-1 rent to cover debt service and fixed costs
    pub break_even_occupancy: f64,
    pub down_payment: f64,
    pub closing_costs: f64,
    /// Year-1 principal and interest per month, cost-signed
    pub monthly_mortgage_payment: f64,
    /// Year-1 fixed ownership costs per month, cost-signed
    pub monthly_operating_expenses: f64,
    /// Year-1 operating cashflow per month
    pub first_year_monthly_net_income: f64,
    pub sale_profit: f64,
}

impl KeyInsights {
    pub fn from_evaluation(assumptions: &Assumptions, evaluation: &Evaluation) -> Self {
        let months = MONTHS_PER_YEAR as f64;
        let fixed_obligations = -(evaluation.mortgage_payments[0] + evaluation.fixed_costs[0]);

        Self {
            occupied_months: months * assumptions.occupancy_rate,
            break_even_occupancy: fixed_obligations / assumptions.daily_rate / NIGHTS_PER_YEAR,
            down_payment: evaluation.outlay.down_payment,
            closing_costs: evaluation.outlay.closing_costs,
            monthly_mortgage_payment: evaluation.mortgage_payments[0] / months,
            monthly_operating_expenses: evaluation.fixed_costs[0] / months,
            first_year_monthly_net_income: evaluation.operating_cashflow[0] / months,
            sale_profit: evaluation.sale_profit(),
        }
    }

    /// Copy with every money figure rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            occupied_months: round2(self.occupied_months),
            break_even_occupancy: round2(self.break_even_occupancy),
            down_payment: round2(self.down_payment),
            closing_costs: round2(self.closing_costs),
            monthly_mortgage_payment: round2(self.monthly_mortgage_payment),
            monthly_operating_expenses: round2(self.monthly_operating_expenses),
            first_year_monthly_net_income: round2(self.first_year_monthly_net_income),
            sale_profit: round2(self.sale_profit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::EvaluationEngine;
    use approx::assert_abs_diff_eq;

    fn reference_insights() -> KeyInsights {
        let assumptions = Assumptions::default_scenario();
        let evaluation = EvaluationEngine::default().evaluate(&assumptions).unwrap();
        KeyInsights::from_evaluation(&assumptions, &evaluation)
    }

    #[test]
    fn test_reference_insights() {
        let insights = reference_insights();

        assert_abs_diff_eq!(insights.occupied_months, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(insights.down_payment, 64_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(insights.closing_costs, 12_800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(insights.monthly_mortgage_payment, -1_413.64, epsilon = 0.01);
        assert_abs_diff_eq!(insights.monthly_operating_expenses, -8_800.0 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            insights.first_year_monthly_net_income,
            45_685.05 / 12.0,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_break_even_occupancy() {
        let insights = reference_insights();
        // (16963.70 debt service + 8800 fixed) / 450 / 365
        assert_abs_diff_eq!(insights.break_even_occupancy, 0.1569, epsilon = 1e-4);
        assert!(insights.break_even_occupancy < Assumptions::default_scenario().occupancy_rate);
    }

    #[test]
    fn test_rounded_copy() {
        let rounded = reference_insights().rounded();
        assert_eq!(rounded.monthly_mortgage_payment, -1_413.64);
        assert_eq!(rounded.break_even_occupancy, 0.16);
    }
}
