//! Credit-request evaluation: affordability ratios, the R1–R7.5 policy rule
//! matrix, and the resulting decision.

pub mod engine;
pub mod model;
pub mod ratios;
pub mod rules;
pub mod status;

pub use engine::{
    evaluate, evaluate_request, evaluate_strict, evaluate_strict_with_policy,
    evaluate_with_policy, Decision, EvaluationInput, EvaluationResult,
};
pub use model::{validate_loan_terms, ClientProfile, LoanRequest};
pub use rules::{applicable_rules, EvaluationPolicy, RuleAssertions, RuleId, RuleOutcome, ALL_RULES};
pub use status::{apply_decision, RequestStatus};
