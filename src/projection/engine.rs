//! Orchestration: assumptions in, cashflow schedule and NPV/IRR out

use super::cashflows::{Evaluation, ResultBundle};
use super::costs::{variable_costs, FixedCosts};
use super::mortgage::{annual_debt_service, Loan};
use super::outlay::InitialOutlay;
use super::rents::project_rents;
use super::terminal::terminal_value;
use super::{AnnualSeries, CashflowSequence, HORIZON_YEARS};
use crate::assumptions::Assumptions;
use crate::error::{EvaluationError, Result};
use crate::valuation::{calculate_irr, DiscountCurve, IrrConfig};
use log::{debug, info, warn};

/// Stateless evaluator; holds only the IRR solver policy
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    irr_config: IrrConfig,
}

impl EvaluationEngine {
    pub fn new(irr_config: IrrConfig) -> Self {
        Self { irr_config }
    }

    /// Evaluate a property; an undefined IRR fails the whole evaluation
    pub fn evaluate(&self, assumptions: &Assumptions) -> Result<Evaluation> {
        let mut evaluation = self.project(assumptions)?;
        let irr = calculate_irr(&evaluation.full_cashflow_sequence, &self.irr_config)?;
        evaluation.irr = Some(irr);

        info!(
            "Evaluated property at {:.0}: NPV {:.2}, IRR {:.4}",
            assumptions.purchase_price, evaluation.net_present_value, irr
        );
        Ok(evaluation)
    }

    /// Like [`evaluate`](Self::evaluate), but reports an undefined IRR as
    /// `irr: None` so the cashflow schedule can still be shown
    pub fn evaluate_lenient(&self, assumptions: &Assumptions) -> Result<Evaluation> {
        let mut evaluation = self.project(assumptions)?;
        match calculate_irr(&evaluation.full_cashflow_sequence, &self.irr_config) {
            Ok(irr) => evaluation.irr = Some(irr),
            Err(EvaluationError::UndefinedIrr { reason }) => {
                warn!("IRR undefined: {}", reason);
            }
            Err(e) => return Err(e),
        }
        Ok(evaluation)
    }

    /// Everything except the IRR
    fn project(&self, assumptions: &Assumptions) -> Result<Evaluation> {
        assumptions.validate()?;

        // Computed once and shared by every revenue-driven line
        let rents = project_rents(
            assumptions.daily_rate,
            assumptions.occupancy_rate,
            assumptions.rent_growth_rate,
        );

        let loan = Loan::from_purchase(
            assumptions.purchase_price,
            assumptions.down_payment_fraction,
            assumptions.interest_rate,
        );
        let mortgage_payments = annual_debt_service(
            &loan,
            assumptions.down_payment_fraction,
            assumptions.monthly_mortgage_insurance,
        )?;
        let fixed_costs = FixedCosts::from_assumptions(assumptions).schedule();
        let variable_costs = variable_costs(&rents, assumptions.revenue_fee_fraction());

        let terminal = terminal_value(
            &loan,
            assumptions.purchase_price,
            assumptions.appreciation_rate,
        )?;
        debug!(
            "Year 1 rent {:.2}, debt service {:.2}, fixed {:.2}, variable {:.2}; sale profit {:.2}",
            rents[0], mortgage_payments[0], fixed_costs[0], variable_costs[0], terminal.sale_profit
        );

        let mut total_expenses = [0.0; HORIZON_YEARS];
        let mut operating_cashflow = [0.0; HORIZON_YEARS];
        for year in 0..HORIZON_YEARS {
            total_expenses[year] =
                mortgage_payments[year] + fixed_costs[year] + variable_costs[year];
            operating_cashflow[year] = rents[year] + total_expenses[year];
        }
        operating_cashflow[HORIZON_YEARS - 1] += terminal.sale_profit;
        ensure_finite("operating cashflow", &operating_cashflow)?;

        let curve = DiscountCurve::single_rate(assumptions.discount_rate);
        let present_value = curve.present_value(&operating_cashflow);
        let outlay = InitialOutlay::from_assumptions(assumptions);
        let net_present_value = present_value - outlay.total();
        if !net_present_value.is_finite() {
            return Err(EvaluationError::degenerate(
                "net present value",
                format!("result is {}", net_present_value),
            ));
        }

        let mut full_cashflow_sequence: CashflowSequence = [0.0; HORIZON_YEARS + 1];
        full_cashflow_sequence[0] = -outlay.total();
        full_cashflow_sequence[1..].copy_from_slice(&operating_cashflow);

        debug!(
            "PV {:.2}, initial outlay {:.2}, NPV {:.2}",
            present_value,
            outlay.total(),
            net_present_value
        );

        Ok(Evaluation {
            rents,
            terminal,
            mortgage_payments,
            fixed_costs,
            variable_costs,
            total_expenses,
            operating_cashflow,
            present_value,
            outlay,
            net_present_value,
            full_cashflow_sequence,
            irr: None,
        })
    }
}

/// Evaluate with the default solver policy and return the rounded bundle
pub fn evaluate(assumptions: &Assumptions) -> Result<ResultBundle> {
    EvaluationEngine::default()
        .evaluate(assumptions)
        .map(|evaluation| evaluation.to_bundle())
}

fn ensure_finite(stage: &'static str, series: &AnnualSeries) -> Result<()> {
    match series.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(EvaluationError::degenerate(
            stage,
            format!("year {} is {}", i + 1, series[i]),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::npv_at_rate;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert, proptest};

    fn reference() -> Assumptions {
        Assumptions::default_scenario()
    }

    #[test]
    fn test_reference_scenario_shapes() {
        let evaluation = EvaluationEngine::default().evaluate(&reference()).unwrap();

        assert_eq!(evaluation.operating_cashflow.len(), 10);
        assert_eq!(evaluation.full_cashflow_sequence.len(), 11);
        assert_eq!(evaluation.full_cashflow_sequence[0], -evaluation.initial_outlay());
        assert_eq!(&evaluation.full_cashflow_sequence[1..], &evaluation.operating_cashflow[..]);
    }

    #[test]
    fn test_reference_scenario_figures() {
        let evaluation = EvaluationEngine::default().evaluate(&reference()).unwrap();

        assert_abs_diff_eq!(evaluation.rents[0], 82_125.0, epsilon = 1e-9);
        assert_abs_diff_eq!(evaluation.operating_cashflow[0], 45_685.05, epsilon = 0.01);
        assert_abs_diff_eq!(evaluation.operating_cashflow[9], 239_914.79, epsilon = 0.01);
        assert_abs_diff_eq!(evaluation.initial_outlay(), 76_800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(evaluation.present_value, 511_062.02, epsilon = 0.01);
        assert_abs_diff_eq!(evaluation.net_present_value, 434_262.02, epsilon = 0.01);
        assert_abs_diff_eq!(evaluation.irr.unwrap(), 0.6302, epsilon = 1e-4);
    }

    #[test]
    fn test_irr_zeroes_full_sequence_npv() {
        let evaluation = EvaluationEngine::default().evaluate(&reference()).unwrap();
        let irr = evaluation.irr.unwrap();
        let residual = npv_at_rate(&evaluation.full_cashflow_sequence, irr);
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_expenses_are_sum_of_cost_lines() {
        let evaluation = EvaluationEngine::default().evaluate(&reference()).unwrap();
        for row in evaluation.rows() {
            assert_relative_eq!(
                row.total_expenses,
                row.mortgage_payment + row.fixed_costs + row.variable_costs,
                max_relative = 1e-12
            );
            assert!(row.total_expenses < 0.0);
        }
    }

    #[test]
    fn test_sale_profit_only_in_final_year() {
        let evaluation = EvaluationEngine::default().evaluate(&reference()).unwrap();
        let rows = evaluation.rows();

        assert_relative_eq!(
            rows[8].operating_cashflow,
            rows[8].rent + rows[8].total_expenses,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            rows[9].operating_cashflow,
            rows[9].rent + rows[9].total_expenses + evaluation.sale_profit(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_mortgage_insurance_reaches_cashflow() {
        let mut assumptions = reference();
        assumptions.down_payment_fraction = 0.10;
        let without = EvaluationEngine::default().evaluate(&assumptions).unwrap();

        assumptions.monthly_mortgage_insurance = 100.0;
        let with = EvaluationEngine::default().evaluate(&assumptions).unwrap();

        assert_abs_diff_eq!(
            without.operating_cashflow[0] - with.operating_cashflow[0],
            1_200.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_invalid_input_fails_before_computation() {
        let mut assumptions = reference();
        assumptions.occupancy_rate = -0.1;

        assert!(matches!(
            evaluate(&assumptions),
            Err(EvaluationError::InvalidInput { field: "occupancy_rate", .. })
        ));
    }

    #[test]
    fn test_no_outlay_means_undefined_irr() {
        let mut assumptions = reference();
        assumptions.down_payment_fraction = 0.0;
        assumptions.closing_cost_fraction = 0.0;
        assumptions.start_up_costs = 0.0;

        let engine = EvaluationEngine::default();
        assert!(matches!(
            engine.evaluate(&assumptions),
            Err(EvaluationError::UndefinedIrr { .. })
        ));

        let lenient = engine.evaluate_lenient(&assumptions).unwrap();
        assert!(lenient.irr.is_none());
        assert!(lenient.net_present_value > 0.0);
        assert_eq!(lenient.to_bundle().irr, None);
    }

    #[test]
    fn test_overflowing_rent_is_degenerate() {
        let mut assumptions = reference();
        assumptions.daily_rate = 1e306;

        let engine = EvaluationEngine::default();
        assert!(matches!(
            engine.evaluate(&assumptions),
            Err(EvaluationError::ArithmeticDegenerate { stage: "operating cashflow", .. })
        ));
        assert!(matches!(
            engine.evaluate_lenient(&assumptions),
            Err(EvaluationError::ArithmeticDegenerate { stage: "operating cashflow", .. })
        ));
        assert!(matches!(
            evaluate(&assumptions),
            Err(EvaluationError::ArithmeticDegenerate { .. })
        ));
    }

    #[test]
    fn test_bundle_is_rounded() {
        let bundle = evaluate(&reference()).unwrap();

        assert_eq!(bundle.rents[0], 82_125.0);
        assert_eq!(bundle.rents[1], 83_767.5);
        assert_eq!(bundle.initial_outlay, 76_800.0);
        assert_eq!(bundle.full_cashflow_sequence[0], -76_800.0);
        assert_eq!(bundle.irr, Some(0.63));
        for value in bundle.operating_cashflow {
            assert_eq!(value, (value * 100.0).round() / 100.0);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_npv_decreases_with_discount_rate(
            low_bp in 0u32..2_000,
            step_bp in 1u32..1_000,
            occupancy_pct in 20u32..=100
        ) {
            let mut assumptions = reference();
            assumptions.occupancy_rate = occupancy_pct as f64 / 100.0;

            assumptions.discount_rate = low_bp as f64 / 10_000.0;
            let low = EvaluationEngine::default().evaluate_lenient(&assumptions).unwrap();

            assumptions.discount_rate = (low_bp + step_bp) as f64 / 10_000.0;
            let high = EvaluationEngine::default().evaluate_lenient(&assumptions).unwrap();

            prop_assert!(high.net_present_value < low.net_present_value);
        }
    }
}
