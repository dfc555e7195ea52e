//! Operating cost aggregation
//!
//! Two families of cost:
//! - **Fixed** ownership costs (HOA, repairs, tax, internet, insurance) that do
//!   not depend on bookings
//! - **Variable** revenue-driven fees (platform hosting, card processing,
//!   property management) charged as a share of rent

use super::{AnnualSeries, HORIZON_YEARS};
use crate::assumptions::Assumptions;

/// Annualized fixed ownership costs, as positive amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCosts {
    pub hoa: f64,
    pub repairs: f64,
    pub property_tax: f64,
    pub utilities: f64,
    pub internet: f64,
    pub home_insurance: f64,
}

impl FixedCosts {
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        let price = assumptions.purchase_price;
        Self {
            hoa: assumptions.monthly_hoa * 12.0,
            repairs: assumptions.annual_repair_fraction * price,
            property_tax: assumptions.property_tax_rate * price,
            utilities: assumptions.monthly_utilities * 12.0,
            internet: assumptions.monthly_internet * 12.0,
            home_insurance: assumptions.monthly_home_insurance * 12.0,
        }
    }

    /// Annual total entering the cashflow. Utilities are not part of it.
    pub fn annual_total(&self) -> f64 {
        self.hoa + self.repairs + self.property_tax + self.internet + self.home_insurance
    }

    /// Level, cost-signed schedule over the holding period
    pub fn schedule(&self) -> AnnualSeries {
        [-self.annual_total(); HORIZON_YEARS]
    }
}

/// Revenue-proportional fees for each year, cost-signed
pub fn variable_costs(rents: &AnnualSeries, fee_fraction: f64) -> AnnualSeries {
    rents.map(|rent| -(rent * fee_fraction))
}
