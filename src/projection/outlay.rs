//! Capital deployed at purchase

use crate::assumptions::Assumptions;
use serde::{Deserialize, Serialize};

/// Cash needed at time zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialOutlay {
    pub down_payment: f64,
    pub closing_costs: f64,
    /// Furniture, linens and other one-time set-up spending
    pub start_up_costs: f64,
}

impl InitialOutlay {
    pub fn new(
        purchase_price: f64,
        down_payment_fraction: f64,
        closing_cost_fraction: f64,
        start_up_costs: f64,
    ) -> Self {
        Self {
            down_payment: down_payment_fraction * purchase_price,
            closing_costs: closing_cost_fraction * purchase_price,
            start_up_costs,
        }
    }

    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self::new(
            assumptions.purchase_price,
            assumptions.down_payment_fraction,
            assumptions.closing_cost_fraction,
            assumptions.start_up_costs,
        )
    }

    pub fn total(&self) -> f64 {
        self.down_payment + self.closing_costs + self.start_up_costs
    }
}
