//! Rental Evaluation CLI
//!
//! Command-line interface for evaluating a short-term-rental purchase

use anyhow::{Context, Result};
use clap::Parser;
use rental_evaluation::{Assumptions, EvaluationEngine, KeyInsights, ResultBundle};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rental_evaluation",
    version,
    about = "Evaluate a short-term rental over a 10-year hold"
)]
struct Cli {
    /// Assumptions file (.json or .csv); unspecified fields use the reference scenario
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Average nightly rate
    #[arg(long)]
    daily_rate: Option<f64>,

    /// Share of nights booked (0-1)
    #[arg(long)]
    occupancy_rate: Option<f64>,

    /// Annual rent growth (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    rent_growth_rate: Option<f64>,

    #[arg(long)]
    purchase_price: Option<f64>,

    /// Down payment as a fraction of price (0-1)
    #[arg(long)]
    down_payment: Option<f64>,

    /// Annual mortgage interest rate
    #[arg(long)]
    interest_rate: Option<f64>,

    /// Required annual rate of return
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Monthly mortgage insurance premium (charged below 20% down)
    #[arg(long)]
    mortgage_insurance: Option<f64>,

    /// Print the result bundle as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write the yearly cashflow table to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Cli {
    fn assumptions(&self) -> Result<Assumptions> {
        let mut assumptions = match &self.assumptions {
            Some(path) => Assumptions::from_path(path)
                .with_context(|| format!("failed to load assumptions from {}", path.display()))?,
            None => Assumptions::default_scenario(),
        };

        let overrides = [
            (self.daily_rate, &mut assumptions.daily_rate),
            (self.occupancy_rate, &mut assumptions.occupancy_rate),
            (self.rent_growth_rate, &mut assumptions.rent_growth_rate),
            (self.purchase_price, &mut assumptions.purchase_price),
            (self.down_payment, &mut assumptions.down_payment_fraction),
            (self.interest_rate, &mut assumptions.interest_rate),
            (self.discount_rate, &mut assumptions.discount_rate),
            (self.mortgage_insurance, &mut assumptions.monthly_mortgage_insurance),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }

        Ok(assumptions)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    bundle: &'a ResultBundle,
    insights: KeyInsights,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = cli.assumptions()?;

    let engine = EvaluationEngine::default();
    let evaluation = engine
        .evaluate_lenient(&assumptions)
        .context("evaluation failed")?;
    let bundle = evaluation.to_bundle();
    let insights = KeyInsights::from_evaluation(&assumptions, &evaluation).rounded();

    if let Some(path) = &cli.csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        for row in evaluation.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("Cashflow table written to {}", path.display());
    }

    if cli.json {
        let report = Report {
            bundle: &bundle,
            insights,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Short-Term Rental Evaluation");
    println!("============================\n");

    println!("Investment metrics:");
    println!("  Net Present Value:              ${:.0}", bundle.net_present_value);
    match bundle.irr {
        Some(irr) => println!("  Internal Rate of Return:        {:.0}%", irr * 100.0),
        None => println!("  Internal Rate of Return:        undefined"),
    }
    println!("  First Year Monthly Net Income:  ${:.0}", insights.first_year_monthly_net_income);
    println!();

    println!("Annual cashflows by year:");
    println!(
        "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Year", "Rent", "Mortgage", "Fixed", "Variable", "Expenses", "Net Cashflow"
    );
    println!("{}", "-".repeat(84));
    for row in evaluation.rows() {
        println!(
            "{:>4} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.year,
            row.rent,
            row.mortgage_payment,
            row.fixed_costs,
            row.variable_costs,
            row.total_expenses,
            row.operating_cashflow,
        );
    }
    println!();

    println!("Key insights:");
    println!("  Occupied months per year:     {:.1}", insights.occupied_months);
    println!("  Break-even occupancy:         {:.0}%", insights.break_even_occupancy * 100.0);
    println!("  Down payment:                 ${:.0}", insights.down_payment);
    println!("  Closing costs:                ${:.0}", insights.closing_costs);
    println!("  Monthly mortgage payment:     ${:.0}", insights.monthly_mortgage_payment);
    println!("  Monthly operating expenses:   ${:.0}", insights.monthly_operating_expenses);
    println!("  Profit from sale in year 10:  ${:.0}", insights.sale_profit);

    Ok(())
}
