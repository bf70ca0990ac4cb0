use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ratios::round_ratio;
use crate::documents::LoanType;
use crate::types::{Currency, Percent};

// ---------------------------------------------------------------------------
// Rule identifiers
// ---------------------------------------------------------------------------

/// Bank policy rules an underwriter signs off on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "R1")]
    PaymentToIncome,
    #[serde(rename = "R2")]
    CreditHistory,
    #[serde(rename = "R3")]
    EmploymentStability,
    #[serde(rename = "R4")]
    DebtToIncome,
    #[serde(rename = "R5")]
    MaxFinancing,
    #[serde(rename = "R6")]
    AgeRestriction,
    #[serde(rename = "R7.1")]
    MinimumBalance,
    #[serde(rename = "R7.2")]
    ConsistentSavingsHistory,
    #[serde(rename = "R7.3")]
    PeriodicDeposits,
    #[serde(rename = "R7.4")]
    BalanceYearsRatio,
    #[serde(rename = "R7.5")]
    RecentWithdrawals,
}

pub const ALL_RULES: [RuleId; 11] = [
    RuleId::PaymentToIncome,
    RuleId::CreditHistory,
    RuleId::EmploymentStability,
    RuleId::DebtToIncome,
    RuleId::MaxFinancing,
    RuleId::AgeRestriction,
    RuleId::MinimumBalance,
    RuleId::ConsistentSavingsHistory,
    RuleId::PeriodicDeposits,
    RuleId::BalanceYearsRatio,
    RuleId::RecentWithdrawals,
];

impl RuleId {
    pub fn code(self) -> &'static str {
        match self {
            RuleId::PaymentToIncome => "R1",
            RuleId::CreditHistory => "R2",
            RuleId::EmploymentStability => "R3",
            RuleId::DebtToIncome => "R4",
            RuleId::MaxFinancing => "R5",
            RuleId::AgeRestriction => "R6",
            RuleId::MinimumBalance => "R7.1",
            RuleId::ConsistentSavingsHistory => "R7.2",
            RuleId::PeriodicDeposits => "R7.3",
            RuleId::BalanceYearsRatio => "R7.4",
            RuleId::RecentWithdrawals => "R7.5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleId::PaymentToIncome => "Payment-to-income ratio",
            RuleId::CreditHistory => "Credit history",
            RuleId::EmploymentStability => "Employment stability",
            RuleId::DebtToIncome => "Debt-to-income ratio",
            RuleId::MaxFinancing => "Maximum financing amount",
            RuleId::AgeRestriction => "Age at end of term",
            RuleId::MinimumBalance => "Savings: minimum balance",
            RuleId::ConsistentSavingsHistory => "Savings: consistent history",
            RuleId::PeriodicDeposits => "Savings: periodic deposits",
            RuleId::BalanceYearsRatio => "Savings: balance to account age",
            RuleId::RecentWithdrawals => "Savings: recent withdrawals",
        }
    }

    /// Rules backed by a computed figure as well as the underwriter's call.
    pub fn has_threshold(self) -> bool {
        matches!(
            self,
            RuleId::PaymentToIncome | RuleId::DebtToIncome | RuleId::AgeRestriction
        )
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.label())
    }
}

/// Rules that must hold for a loan type to be approved.
pub fn applicable_rules(loan_type: LoanType) -> &'static [RuleId] {
    match loan_type {
        LoanType::FirstDwelling
        | LoanType::SecondDwelling
        | LoanType::CommercialProperty
        | LoanType::Renovation => &ALL_RULES,
    }
}

// ---------------------------------------------------------------------------
// Underwriter assertions
// ---------------------------------------------------------------------------

/// Underwriter sign-offs, one per rule. `None` means the rule has not been
/// looked at yet, which is different from a failed rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleAssertions {
    pub r1_payment_to_income: Option<bool>,
    pub r2_credit_history: Option<bool>,
    pub r3_employment_stability: Option<bool>,
    pub r4_debt_to_income: Option<bool>,
    pub r5_max_financing: Option<bool>,
    pub r6_age_restriction: Option<bool>,
    pub r71_minimum_balance: Option<bool>,
    pub r72_consistent_savings_history: Option<bool>,
    pub r73_periodic_deposits: Option<bool>,
    pub r74_balance_years_ratio: Option<bool>,
    pub r75_recent_withdrawals: Option<bool>,
}

impl RuleAssertions {
    /// Every rule asserted with the same value.
    pub fn all(value: bool) -> Self {
        let mut assertions = RuleAssertions::default();
        for rule in ALL_RULES {
            assertions.set(rule, value);
        }
        assertions
    }

    pub fn get(&self, rule: RuleId) -> Option<bool> {
        *self.slot(rule)
    }

    pub fn set(&mut self, rule: RuleId, value: bool) {
        *self.slot_mut(rule) = Some(value);
    }

    pub fn clear(&mut self, rule: RuleId) {
        *self.slot_mut(rule) = None;
    }

    fn slot(&self, rule: RuleId) -> &Option<bool> {
        match rule {
            RuleId::PaymentToIncome => &self.r1_payment_to_income,
            RuleId::CreditHistory => &self.r2_credit_history,
            RuleId::EmploymentStability => &self.r3_employment_stability,
            RuleId::DebtToIncome => &self.r4_debt_to_income,
            RuleId::MaxFinancing => &self.r5_max_financing,
            RuleId::AgeRestriction => &self.r6_age_restriction,
            RuleId::MinimumBalance => &self.r71_minimum_balance,
            RuleId::ConsistentSavingsHistory => &self.r72_consistent_savings_history,
            RuleId::PeriodicDeposits => &self.r73_periodic_deposits,
            RuleId::BalanceYearsRatio => &self.r74_balance_years_ratio,
            RuleId::RecentWithdrawals => &self.r75_recent_withdrawals,
        }
    }

    fn slot_mut(&mut self, rule: RuleId) -> &mut Option<bool> {
        match rule {
            RuleId::PaymentToIncome => &mut self.r1_payment_to_income,
            RuleId::CreditHistory => &mut self.r2_credit_history,
            RuleId::EmploymentStability => &mut self.r3_employment_stability,
            RuleId::DebtToIncome => &mut self.r4_debt_to_income,
            RuleId::MaxFinancing => &mut self.r5_max_financing,
            RuleId::AgeRestriction => &mut self.r6_age_restriction,
            RuleId::MinimumBalance => &mut self.r71_minimum_balance,
            RuleId::ConsistentSavingsHistory => &mut self.r72_consistent_savings_history,
            RuleId::PeriodicDeposits => &mut self.r73_periodic_deposits,
            RuleId::BalanceYearsRatio => &mut self.r74_balance_years_ratio,
            RuleId::RecentWithdrawals => &mut self.r75_recent_withdrawals,
        }
    }
}

// ---------------------------------------------------------------------------
// Policy thresholds
// ---------------------------------------------------------------------------

/// Numeric limits behind the threshold rules. Defaults are the bank's
/// published policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationPolicy {
    /// R1 upper bound, percent of salary.
    pub max_payment_to_income: Percent,
    /// R4 upper bound, percent of salary.
    pub max_debt_to_income: Percent,
    /// R6 upper bound on age when the loan is repaid.
    pub max_age_at_term_end: u32,
    pub currency: Currency,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        EvaluationPolicy {
            max_payment_to_income: dec!(25),
            max_debt_to_income: dec!(40),
            max_age_at_term_end: 75,
            currency: Currency::CLP,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: RuleId,
    pub label: String,
    /// Figure the threshold was checked against, for threshold rules,
    /// rounded for display. The check itself uses the exact figure.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub measured: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub threshold_passed: Option<bool>,
    pub asserted: Option<bool>,
    /// `None` while the underwriter has not asserted the rule.
    pub passed: Option<bool>,
}

/// Figures the threshold rules are measured against. Ratios are exact
/// percentages, not the rounded values shown to underwriters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub payment_to_income: Percent,
    pub debt_to_income: Percent,
    pub age_at_term_end: u32,
}

/// Combine the automatic threshold (where the rule has one) with the
/// underwriter's assertion.
pub fn evaluate_rule(
    rule: RuleId,
    measurements: &Measurements,
    policy: &EvaluationPolicy,
    assertions: &RuleAssertions,
) -> RuleOutcome {
    let threshold = match rule {
        RuleId::PaymentToIncome => Some((
            measurements.payment_to_income,
            policy.max_payment_to_income,
        )),
        RuleId::DebtToIncome => Some((measurements.debt_to_income, policy.max_debt_to_income)),
        RuleId::AgeRestriction => Some((
            Decimal::from(measurements.age_at_term_end),
            Decimal::from(policy.max_age_at_term_end),
        )),
        _ => None,
    };

    let threshold_passed = threshold.map(|(measured, limit)| measured <= limit);
    let asserted = assertions.get(rule);
    let passed = asserted.map(|a| a && threshold_passed.unwrap_or(true));

    RuleOutcome {
        rule,
        label: rule.label().to_string(),
        measured: threshold.map(|(m, _)| round_ratio(m)),
        limit: threshold.map(|(_, l)| l),
        threshold_passed,
        asserted,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements() -> Measurements {
        Measurements {
            payment_to_income: dec!(30),
            debt_to_income: dec!(40),
            age_at_term_end: 78,
        }
    }

    #[test]
    fn test_assertions_wire_names() {
        let json = r#"{"r1PaymentToIncome": true, "r75RecentWithdrawals": false}"#;
        let a: RuleAssertions = serde_json::from_str(json).unwrap();
        assert_eq!(a.get(RuleId::PaymentToIncome), Some(true));
        assert_eq!(a.get(RuleId::RecentWithdrawals), Some(false));
        assert_eq!(a.get(RuleId::CreditHistory), None);
    }

    #[test]
    fn test_set_and_clear() {
        let mut a = RuleAssertions::all(true);
        assert!(ALL_RULES.iter().all(|r| a.get(*r) == Some(true)));
        a.clear(RuleId::BalanceYearsRatio);
        assert_eq!(a.get(RuleId::BalanceYearsRatio), None);
        a.set(RuleId::BalanceYearsRatio, false);
        assert_eq!(a.get(RuleId::BalanceYearsRatio), Some(false));
    }

    #[test]
    fn test_threshold_failure_overrides_assertion() {
        let out = evaluate_rule(
            RuleId::PaymentToIncome,
            &measurements(),
            &EvaluationPolicy::default(),
            &RuleAssertions::all(true),
        );
        assert_eq!(out.threshold_passed, Some(false));
        assert_eq!(out.passed, Some(false));
        assert_eq!(out.measured, Some(dec!(30)));
        assert_eq!(out.limit, Some(dec!(25)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let out = evaluate_rule(
            RuleId::DebtToIncome,
            &measurements(),
            &EvaluationPolicy::default(),
            &RuleAssertions::all(true),
        );
        assert_eq!(out.threshold_passed, Some(true));
        assert_eq!(out.passed, Some(true));
    }

    #[test]
    fn test_limit_applies_to_exact_ratio() {
        let m = Measurements {
            payment_to_income: dec!(25.0039917),
            debt_to_income: dec!(39.996),
            age_at_term_end: 60,
        };
        let policy = EvaluationPolicy::default();
        let all = RuleAssertions::all(true);

        let r1 = evaluate_rule(RuleId::PaymentToIncome, &m, &policy, &all);
        assert_eq!(r1.measured, Some(dec!(25.00)));
        assert_eq!(r1.threshold_passed, Some(false));

        // Rounds up to the limit for display but is under it
        let r4 = evaluate_rule(RuleId::DebtToIncome, &m, &policy, &all);
        assert_eq!(r4.measured, Some(dec!(40.00)));
        assert_eq!(r4.threshold_passed, Some(true));
    }

    #[test]
    fn test_age_rule() {
        let out = evaluate_rule(
            RuleId::AgeRestriction,
            &measurements(),
            &EvaluationPolicy::default(),
            &RuleAssertions::all(true),
        );
        assert_eq!(out.measured, Some(dec!(78)));
        assert_eq!(out.passed, Some(false));
    }

    #[test]
    fn test_missing_assertion_is_undecided() {
        let out = evaluate_rule(
            RuleId::CreditHistory,
            &measurements(),
            &EvaluationPolicy::default(),
            &RuleAssertions::default(),
        );
        assert_eq!(out.threshold_passed, None);
        assert_eq!(out.passed, None);
    }

    #[test]
    fn test_codes_serialize() {
        assert_eq!(
            serde_json::to_string(&RuleId::PeriodicDeposits).unwrap(),
            "\"R7.3\""
        );
    }
}
