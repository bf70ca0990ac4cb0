use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use mortgage_credit_core::amortization::{amortization_schedule_in, monthly_payment_in};
use mortgage_credit_core::Currency;

use crate::input;

/// Loan terms shared by the payment and schedule commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanTermsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, alias = "principal")]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (4.5 = 4.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Round to this currency's minor unit (CLP, CLF, USD, EUR)
    #[arg(long, default_value = "CLP", value_parser = parse_currency)]
    pub currency: Currency,
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

#[derive(Debug, Deserialize)]
struct LoanTerms {
    #[serde(alias = "loan_amount", alias = "requested_amount")]
    principal: Decimal,
    #[serde(alias = "interest_rate")]
    annual_rate: Decimal,
    term_years: u32,
}

pub fn run_monthly_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let currency = args.terms.currency;
    let terms = resolve_terms(args.terms)?;
    let payment = monthly_payment_in(currency, terms.principal, terms.annual_rate, terms.term_years)?;
    tracing::info!(%payment, "monthly payment computed");

    Ok(json!({
        "monthly_payment": payment,
        "principal": terms.principal,
        "annual_rate_pct": terms.annual_rate,
        "term_years": terms.term_years,
        "currency": currency,
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let currency = args.terms.currency;
    let terms = resolve_terms(args.terms)?;
    let schedule =
        amortization_schedule_in(currency, terms.principal, terms.annual_rate, terms.term_years)?;
    tracing::info!(payments = schedule.number_of_payments, "schedule built");
    Ok(serde_json::to_value(schedule)?)
}

fn resolve_terms(args: LoanTermsArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if args.input.is_none() && (args.amount.is_some() || args.rate.is_some() || args.term_years.is_some()) {
        return Ok(LoanTerms {
            principal: args.amount.ok_or("--amount is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term_years.ok_or("--term-years is required (or provide --input)")?,
        });
    }

    input::read_document(args.input.as_deref())?
        .ok_or_else(|| "--amount, --rate and --term-years are required (or provide --input)".into())
}

pub(crate) fn parse_currency(s: &str) -> Result<Currency, String> {
    match s.to_ascii_uppercase().as_str() {
        "CLP" => Ok(Currency::CLP),
        "CLF" | "UF" => Ok(Currency::CLF),
        "USD" => Ok(Currency::USD),
        "EUR" => Ok(Currency::EUR),
        other => Err(format!("unsupported currency '{other}'")),
    }
}
