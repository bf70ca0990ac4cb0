use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_credit_core::documents::LoanType;
use mortgage_credit_core::simulation::{simulate_credit, SimulationInput};
use mortgage_credit_core::Currency;

use super::amortization::parse_currency;
use crate::input;

/// Arguments for a credit simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount to borrow
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years (1-30)
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Loan type (first_dwelling, second_dwelling, commercial_property, renovation)
    #[arg(long)]
    pub loan_type: Option<LoanType>,

    /// Include the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,

    /// Currency (CLP, CLF, USD, EUR)
    #[arg(long, value_parser = parse_currency)]
    pub currency: Option<Currency>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::read_document(Some(path))?.ok_or("--input could not be read")?
    } else if args.amount.is_some() || args.rate.is_some() || args.term_years.is_some() {
        SimulationInput {
            loan_amount: args.amount
                .ok_or("--amount is required (or provide --input)")?,
            term_years: args.term_years
                .ok_or("--term-years is required (or provide --input)")?,
            interest_rate: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            loan_type: args.loan_type,
            include_schedule: args.schedule,
            currency: args.currency,
        }
    } else if let Some(doc) = input::read_document(None)? {
        doc
    } else {
        return Err("--amount, --rate and --term-years are required (or provide --input)".into());
    };

    let result = simulate_credit(&sim_input)?;
    tracing::info!(monthly_payment = %result.result.monthly_payment, "simulation complete");
    Ok(serde_json::to_value(result)?)
}
