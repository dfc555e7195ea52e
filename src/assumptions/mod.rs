//! Investment assumptions for a single short-term-rental property

pub mod loader;

use crate::error::{ConfigError, EvaluationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable set of scalar inputs driving one evaluation.
///
/// Rates and fractions are decimals (0.05 for 5%), money is in currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    // Income
    /// Average nightly rate charged to guests
    pub daily_rate: f64,
    /// Share of nights in a year that are booked
    pub occupancy_rate: f64,
    /// Annual growth of rent; may be zero or negative
    pub rent_growth_rate: f64,
    /// Annual appreciation of the property value
    pub appreciation_rate: f64,

    // Mortgage
    /// Annual mortgage interest rate
    pub interest_rate: f64,
    pub purchase_price: f64,
    pub down_payment_fraction: f64,
    pub closing_cost_fraction: f64,
    /// Monthly mortgage insurance premium, only charged below 20% down
    pub monthly_mortgage_insurance: f64,

    // Operating
    pub monthly_hoa: f64,
    /// Annual repair budget as a fraction of the purchase price
    pub annual_repair_fraction: f64,
    /// Property tax as a fraction of the purchase price
    pub property_tax_rate: f64,
    pub monthly_utilities: f64,
    pub monthly_internet: f64,
    pub monthly_home_insurance: f64,
    /// Platform hosting fee as a fraction of rent
    pub hosting_fee_fraction: f64,
    pub credit_card_fee_fraction: f64,
    pub property_management_fraction: f64,

    // Other
    /// One-time costs to get the rental running (furniture, linens)
    pub start_up_costs: f64,
    /// Minimum required rate of return
    pub discount_rate: f64,
}

impl Assumptions {
    /// The reference scenario: a $320k property at $450/night, half occupied
    pub fn default_scenario() -> Self {
        Self {
            daily_rate: 450.0,
            occupancy_rate: 0.50,
            rent_growth_rate: 0.02,
            appreciation_rate: 0.02,
            interest_rate: 0.0525,
            purchase_price: 320_000.0,
            down_payment_fraction: 0.20,
            closing_cost_fraction: 0.04,
            monthly_mortgage_insurance: 0.0,
            monthly_hoa: 0.0,
            annual_repair_fraction: 0.01,
            property_tax_rate: 0.0085,
            monthly_utilities: 150.0,
            monthly_internet: 100.0,
            monthly_home_insurance: 140.0,
            hosting_fee_fraction: 0.03,
            credit_card_fee_fraction: 0.0,
            property_management_fraction: 0.10,
            start_up_costs: 0.0,
            discount_rate: 0.05,
        }
    }

    /// Load assumptions from a `.json` or `.csv` file
    pub fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_path(path),
            Some("csv") => Self::from_csv_path(path),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Load assumptions from a JSON document; absent fields keep their defaults
    pub fn from_json_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        loader::from_json_reader(file)
    }

    /// Load assumptions from a two-column `field,value` CSV
    pub fn from_csv_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        loader::from_csv_reader(file)
    }

    /// Total fee charged on rent (hosting + card processing + management)
    pub fn revenue_fee_fraction(&self) -> f64 {
        self.hosting_fee_fraction
            + self.credit_card_fee_fraction
            + self.property_management_fraction
    }

    /// Check every field against its sensible domain
    pub fn validate(&self) -> Result<()> {
        positive("purchase_price", self.purchase_price)?;
        positive("daily_rate", self.daily_rate)?;

        fraction("occupancy_rate", self.occupancy_rate)?;
        fraction("down_payment_fraction", self.down_payment_fraction)?;
        fraction("closing_cost_fraction", self.closing_cost_fraction)?;
        fraction("annual_repair_fraction", self.annual_repair_fraction)?;
        fraction("property_tax_rate", self.property_tax_rate)?;
        fraction("hosting_fee_fraction", self.hosting_fee_fraction)?;
        fraction("credit_card_fee_fraction", self.credit_card_fee_fraction)?;
        fraction("property_management_fraction", self.property_management_fraction)?;

        non_negative("interest_rate", self.interest_rate)?;
        non_negative("monthly_mortgage_insurance", self.monthly_mortgage_insurance)?;
        non_negative("monthly_hoa", self.monthly_hoa)?;
        non_negative("monthly_utilities", self.monthly_utilities)?;
        non_negative("monthly_internet", self.monthly_internet)?;
        non_negative("monthly_home_insurance", self.monthly_home_insurance)?;
        non_negative("start_up_costs", self.start_up_costs)?;

        growth("rent_growth_rate", self.rent_growth_rate)?;
        growth("appreciation_rate", self.appreciation_rate)?;
        growth("discount_rate", self.discount_rate)?;

        Ok(())
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_scenario()
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EvaluationError::invalid(field, value, "must be a positive amount"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EvaluationError::invalid(field, value, "must not be negative"))
    }
}

fn fraction(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvaluationError::invalid(field, value, "must be a fraction in [0, 1]"))
    }
}

// Compounding at (1 + rate) stays meaningful only above -100%
fn growth(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > -1.0 {
        Ok(())
    } else {
        Err(EvaluationError::invalid(field, value, "must be greater than -1"))
    }
}
