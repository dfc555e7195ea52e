//! File-based assumption loading
//!
//! Two formats are accepted:
//! - JSON objects keyed by field name
//! - Two-column CSV with a `field,value` header
//!
//! Both start from [`Assumptions::default_scenario`], so a file only needs the
//! fields that differ from the reference scenario.

use super::Assumptions;
use crate::error::ConfigError;
use serde::Deserialize;
use std::io::Read;

/// Raw CSV row of an assumptions file
#[derive(Debug, Deserialize)]
struct FieldRow {
    field: String,
    value: String,
}

/// Parse assumptions from a JSON reader
pub fn from_json_reader<R: Read>(reader: R) -> Result<Assumptions, ConfigError> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    log::debug!("Loaded assumptions from JSON: {:?}", assumptions);
    Ok(assumptions)
}

/// Parse assumptions from a `field,value` CSV reader
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Assumptions, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut assumptions = Assumptions::default_scenario();
    let mut count = 0;

    for result in reader.deserialize() {
        let row: FieldRow = result?;
        let value: f64 = row.value.parse().map_err(|_| ConfigError::InvalidValue {
            field: row.field.clone(),
            value: row.value.clone(),
        })?;
        set_field(&mut assumptions, &row.field, value)?;
        count += 1;
    }

    log::debug!("Loaded {} assumption overrides from CSV", count);
    Ok(assumptions)
}

/// Assign a single named field
pub fn set_field(
    assumptions: &mut Assumptions,
    field: &str,
    value: f64,
) -> Result<(), ConfigError> {
    let slot = match field {
        "daily_rate" => &mut assumptions.daily_rate,
        "occupancy_rate" => &mut assumptions.occupancy_rate,
        "rent_growth_rate" => &mut assumptions.rent_growth_rate,
        "appreciation_rate" => &mut assumptions.appreciation_rate,
        "interest_rate" => &mut assumptions.interest_rate,
        "purchase_price" => &mut assumptions.purchase_price,
        "down_payment_fraction" => &mut assumptions.down_payment_fraction,
        "closing_cost_fraction" => &mut assumptions.closing_cost_fraction,
        "monthly_mortgage_insurance" => &mut assumptions.monthly_mortgage_insurance,
        "monthly_hoa" => &mut assumptions.monthly_hoa,
        "annual_repair_fraction" => &mut assumptions.annual_repair_fraction,
        "property_tax_rate" => &mut assumptions.property_tax_rate,
        "monthly_utilities" => &mut assumptions.monthly_utilities,
        "monthly_internet" => &mut assumptions.monthly_internet,
        "monthly_home_insurance" => &mut assumptions.monthly_home_insurance,
        "hosting_fee_fraction" => &mut assumptions.hosting_fee_fraction,
        "credit_card_fee_fraction" => &mut assumptions.credit_card_fee_fraction,
        "property_management_fraction" => &mut assumptions.property_management_fraction,
        "start_up_costs" => &mut assumptions.start_up_costs,
        "discount_rate" => &mut assumptions.discount_rate,
        other => return Err(ConfigError::UnknownField(other.to_string())),
    };
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_partial_document_keeps_defaults() {
        let json = r#"{ "purchase_price": 400000.0, "occupancy_rate": 0.65 }"#;
        let assumptions = from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(assumptions.purchase_price, 400_000.0);
        assert_eq!(assumptions.occupancy_rate, 0.65);
        assert_eq!(assumptions.daily_rate, 450.0);
        assert_eq!(assumptions.monthly_mortgage_insurance, 0.0);
    }

    #[test]
    fn test_json_unknown_field_rejected() {
        let json = r#"{ "purchase_prise": 400000.0 }"#;
        assert!(matches!(
            from_json_reader(json.as_bytes()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_csv_overrides() {
        let csv = "field,value\n\
                   # financing\n\
                   interest_rate, 0.065\n\
                   down_payment_fraction,0.10\n\
                   monthly_mortgage_insurance,95\n";
        let assumptions = from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(assumptions.interest_rate, 0.065);
        assert_eq!(assumptions.down_payment_fraction, 0.10);
        assert_eq!(assumptions.monthly_mortgage_insurance, 95.0);
        assert_eq!(assumptions.purchase_price, 320_000.0);
    }

    #[test]
    fn test_csv_unknown_field() {
        let csv = "field,value\nvacancy_rate,0.2\n";
        match from_csv_reader(csv.as_bytes()) {
            Err(ConfigError::UnknownField(name)) => assert_eq!(name, "vacancy_rate"),
            other => panic!("expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_unparsable_value() {
        let csv = "field,value\ndaily_rate,four hundred\n";
        assert!(matches!(
            from_csv_reader(csv.as_bytes()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
