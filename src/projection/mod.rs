//! Ten-year cashflow projection for a single rental property

mod cashflows;
mod costs;
mod engine;
mod mortgage;
mod outlay;
mod rents;
mod terminal;

pub use cashflows::{round2, CashflowRow, Evaluation, ResultBundle};
pub use costs::{variable_costs, FixedCosts};
pub use engine::{evaluate, EvaluationEngine};
pub use mortgage::{
    annual_debt_service, Loan, AMORTIZATION_MONTHS, MONTHS_PER_YEAR, MORTGAGE_INSURANCE_THRESHOLD,
};
pub use outlay::InitialOutlay;
pub use rents::{project_rents, NIGHTS_PER_YEAR};
pub use terminal::{sale_price_at_horizon, terminal_value, TerminalValue};

/// Length of the holding period in years
pub const HORIZON_YEARS: usize = 10;

/// One figure per holding year (years 1-10)
pub type AnnualSeries = [f64; HORIZON_YEARS];

/// Year 0 followed by years 1-10
pub type CashflowSequence = [f64; HORIZON_YEARS + 1];
