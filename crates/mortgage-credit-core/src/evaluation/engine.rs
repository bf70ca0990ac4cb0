use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::model::{ClientProfile, LoanRequest};
use super::ratios::{age_at_term_end, debt_to_income, payment_to_income, round_ratio};
use super::rules::{
    applicable_rules, evaluate_rule, EvaluationPolicy, Measurements, RuleAssertions, RuleId,
    RuleOutcome,
};
use crate::amortization::monthly_payment_in;
use crate::documents::{required_documents, DocumentKind};
use crate::{MortgageCreditError, MortgageCreditResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
    /// At least one applicable rule has not been asserted yet.
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub request: LoanRequest,
    pub client: ClientProfile,
    #[serde(default)]
    pub assertions: RuleAssertions,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub policy: Option<EvaluationPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_payment: Money,
    /// Percent of salary, 2 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub payment_to_income: Percent,
    /// Percent of salary, 2 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub debt_to_income: Percent,
    pub age_at_term_end: u32,
    pub rules: Vec<RuleOutcome>,
    pub missing_assertions: Vec<RuleId>,
    pub required_documents: Vec<DocumentKind>,
    pub decision: Decision,
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a credit request against the bank's default policy.
pub fn evaluate(
    request: &LoanRequest,
    client: &ClientProfile,
    assertions: &RuleAssertions,
) -> MortgageCreditResult<EvaluationResult> {
    evaluate_with_policy(request, client, assertions, &EvaluationPolicy::default())
}

/// Evaluate a credit request: validate both entities, derive the
/// affordability figures, then combine each applicable rule's threshold with
/// the underwriter's assertion.
///
/// Missing assertions produce a `Pending` decision rather than a rejection.
pub fn evaluate_with_policy(
    request: &LoanRequest,
    client: &ClientProfile,
    assertions: &RuleAssertions,
    policy: &EvaluationPolicy,
) -> MortgageCreditResult<EvaluationResult> {
    client.validate()?;
    let loan_type = request.validate()?;

    let payment = monthly_payment_in(
        policy.currency,
        request.requested_amount,
        request.interest_rate,
        request.term_years,
    )?;

    let measurements = Measurements {
        payment_to_income: payment_to_income(payment, client.monthly_salary)?,
        debt_to_income: debt_to_income(request.monthly_expenses, payment, client.monthly_salary)?,
        age_at_term_end: age_at_term_end(client.age, request.term_years)?,
    };

    let rules: Vec<RuleOutcome> = applicable_rules(loan_type)
        .iter()
        .map(|rule| evaluate_rule(*rule, &measurements, policy, assertions))
        .collect();

    let missing_assertions: Vec<RuleId> = rules
        .iter()
        .filter(|o| o.passed.is_none())
        .map(|o| o.rule)
        .collect();
    let failed: Vec<RuleId> = rules
        .iter()
        .filter(|o| o.passed == Some(false))
        .map(|o| o.rule)
        .collect();

    let decision = if !missing_assertions.is_empty() {
        Decision::Pending
    } else if failed.is_empty() {
        Decision::Approved
    } else {
        Decision::Rejected
    };

    let rationale = rationale(decision, &missing_assertions, &failed);

    Ok(EvaluationResult {
        monthly_payment: payment,
        payment_to_income: round_ratio(measurements.payment_to_income),
        debt_to_income: round_ratio(measurements.debt_to_income),
        age_at_term_end: measurements.age_at_term_end,
        rules,
        missing_assertions,
        required_documents: required_documents(Some(loan_type)).to_vec(),
        decision,
        rationale,
    })
}

/// Like [`evaluate`], but an incomplete assertion set is an error instead of
/// a pending result.
pub fn evaluate_strict(
    request: &LoanRequest,
    client: &ClientProfile,
    assertions: &RuleAssertions,
) -> MortgageCreditResult<EvaluationResult> {
    evaluate_strict_with_policy(request, client, assertions, &EvaluationPolicy::default())
}

/// Strict evaluation against explicit thresholds.
pub fn evaluate_strict_with_policy(
    request: &LoanRequest,
    client: &ClientProfile,
    assertions: &RuleAssertions,
    policy: &EvaluationPolicy,
) -> MortgageCreditResult<EvaluationResult> {
    let result = evaluate_with_policy(request, client, assertions, policy)?;
    if result.decision == Decision::Pending {
        return Err(MortgageCreditError::IncompleteAssertions {
            missing: result
                .missing_assertions
                .iter()
                .map(|r| r.code().to_string())
                .collect(),
        });
    }
    Ok(result)
}

/// Evaluate a self-contained input document and wrap the result in the
/// standard output envelope.
pub fn evaluate_request(
    input: &EvaluationInput,
) -> MortgageCreditResult<ComputationOutput<EvaluationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let policy = input.policy.clone().unwrap_or_default();
    let result = evaluate_with_policy(&input.request, &input.client, &input.assertions, &policy)?;

    if input.client.monthly_salary.is_zero() {
        warnings.push(
            "Client has no declared salary; payment-to-income and debt-to-income default to 0%."
                .into(),
        );
    }
    if input.request.status.is_terminal() {
        warnings.push(format!(
            "Request is already {}; the decision cannot be applied to it.",
            input.request.status
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "loan_type": input.request.loan_type,
        "max_payment_to_income_pct": policy.max_payment_to_income.to_string(),
        "max_debt_to_income_pct": policy.max_debt_to_income.to_string(),
        "max_age_at_term_end": policy.max_age_at_term_end,
        "currency": policy.currency,
        "rounding": "half-up to currency minor unit",
    });

    Ok(with_metadata(
        "Mortgage Credit Evaluation (French amortization, policy rules R1-R7.5)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn rationale(decision: Decision, missing: &[RuleId], failed: &[RuleId]) -> String {
    let codes = |rules: &[RuleId]| {
        rules
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    };

    match decision {
        Decision::Approved => "All applicable policy rules passed.".to_string(),
        Decision::Rejected => format!("Rejected: failed {}.", codes(failed)),
        Decision::Pending if failed.is_empty() => {
            format!("Pending: awaiting assertion for {}.", codes(missing))
        }
        Decision::Pending => format!(
            "Pending: awaiting assertion for {}. Already failing: {}.",
            codes(missing),
            codes(failed)
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
