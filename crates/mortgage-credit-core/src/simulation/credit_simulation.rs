use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{amortization_schedule_in, AmortizationRow};
use crate::documents::{required_documents, DocumentKind, LoanType};
use crate::evaluation::validate_loan_terms;
use crate::{MortgageCreditResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub loan_amount: Money,
    pub term_years: u32,
    /// Annual rate in percent (4.5 = 4.5%).
    pub interest_rate: Percent,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub loan_type: Option<LoanType>,
    /// Attach the month-by-month schedule to the output.
    #[serde(default)]
    pub include_schedule: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Money,
    pub required_documents: Vec<DocumentKind>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schedule: Option<Vec<AmortizationRow>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the monthly installment and total cost of a loan.
pub fn simulate_credit(
    input: &SimulationInput,
) -> MortgageCreditResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_terms(input.loan_amount, input.interest_rate, input.term_years)?;

    let currency = input.currency.unwrap_or_default();
    let schedule =
        amortization_schedule_in(currency, input.loan_amount, input.interest_rate, input.term_years)?;

    if input.loan_type.is_none() {
        warnings.push("No loan type selected; required documents are not listed.".into());
    }

    let output = SimulationOutput {
        monthly_payment: schedule.monthly_payment,
        number_of_payments: schedule.number_of_payments,
        total_paid: schedule.total_paid,
        total_interest: schedule.total_interest,
        required_documents: required_documents(input.loan_type).to_vec(),
        schedule: input.include_schedule.then_some(schedule.rows),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "loan_amount": input.loan_amount.to_string(),
        "term_years": input.term_years,
        "interest_rate_pct": input.interest_rate.to_string(),
        "currency": currency,
        "compounding": "monthly",
    });

    Ok(with_metadata(
        "Credit Simulation (fixed monthly installment)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
