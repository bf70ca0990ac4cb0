use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_credit_core::Currency;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Loan terms as sent by the front end. Field names follow the request form.
#[derive(Debug, Deserialize)]
struct LoanTermsInput {
    #[serde(alias = "loan_amount", alias = "principal")]
    requested_amount: Decimal,
    #[serde(alias = "annual_rate")]
    interest_rate: Decimal,
    term_years: u32,
    #[serde(default)]
    currency: Option<Currency>,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: LoanTermsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let currency = input.currency.unwrap_or_default();
    let payment = mortgage_credit_core::amortization::monthly_payment_in(
        currency,
        input.requested_amount,
        input.interest_rate,
        input.term_years,
    )
    .map_err(to_napi_error)?;
    let output = serde_json::json!({
        "monthly_payment": payment,
        "currency": currency,
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Plain-number variant for simulators that never leave JS numbers.
#[napi]
pub fn quick_monthly_payment(amount: f64, rate: f64, term_years: u32) -> NapiResult<f64> {
    let principal =
        mortgage_credit_core::decimal_from_f64("requested_amount", amount).map_err(to_napi_error)?;
    let annual_rate =
        mortgage_credit_core::decimal_from_f64("interest_rate", rate).map_err(to_napi_error)?;
    let payment =
        mortgage_credit_core::amortization::monthly_payment(principal, annual_rate, term_years)
            .map_err(to_napi_error)?;
    payment
        .to_f64()
        .ok_or_else(|| to_napi_error(format!("payment {payment} does not fit in a JS number")))
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanTermsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_credit_core::amortization::amortization_schedule_in(
        input.currency.unwrap_or_default(),
        input.requested_amount,
        input.interest_rate,
        input.term_years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_credit(input_json: String) -> NapiResult<String> {
    let input: mortgage_credit_core::simulation::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_credit_core::simulation::simulate_credit(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_credit_request(input_json: String) -> NapiResult<String> {
    let input: mortgage_credit_core::evaluation::EvaluationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_credit_core::evaluation::evaluate_request(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Document list for a loan type given by wire name or Spanish label. An
/// empty string means no loan type is selected yet.
#[napi]
pub fn required_documents(loan_type: String) -> NapiResult<String> {
    let loan_type = if loan_type.trim().is_empty() {
        None
    } else {
        Some(
            loan_type
                .parse::<mortgage_credit_core::documents::LoanType>()
                .map_err(to_napi_error)?,
        )
    };
    let docs: Vec<serde_json::Value> = mortgage_credit_core::documents::required_documents(loan_type)
        .iter()
        .map(|doc| {
            serde_json::json!({
                "document": doc,
                "label": doc.label(),
                "storage_key": doc.storage_key(),
            })
        })
        .collect();
    serde_json::to_string(&docs).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// RUT
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_rut(rut: String) -> bool {
    mortgage_credit_core::rut::validate_rut(&rut)
}

#[napi]
pub fn format_rut(rut: String) -> String {
    mortgage_credit_core::rut::format_rut(&rut)
}
