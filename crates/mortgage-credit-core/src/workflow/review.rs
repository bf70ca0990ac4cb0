use serde::{Deserialize, Serialize};
use std::fmt;

use super::wrong_step;
use crate::documents::{required_documents, DocumentKind};
use crate::error::MortgageCreditError;
use crate::evaluation::{
    evaluate_strict_with_policy, evaluate_with_policy, ClientProfile, EvaluationPolicy, EvaluationResult, LoanRequest,
    RuleAssertions, RuleId,
};
use crate::MortgageCreditResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStep {
    ClientInfo,
    LoanDetails,
    Documentation,
    Evaluation,
}

impl fmt::Display for ReviewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewStep::ClientInfo => "client info",
            ReviewStep::LoanDetails => "loan details",
            ReviewStep::Documentation => "documentation",
            ReviewStep::Evaluation => "evaluation",
        })
    }
}

/// Loan-officer flow over a stored request:
/// client info → loan details → documentation → evaluation.
#[derive(Debug, Clone)]
pub struct ReviewWizard {
    step: ReviewStep,
    request: LoanRequest,
    client: ClientProfile,
    assertions: RuleAssertions,
    policy: EvaluationPolicy,
}

impl ReviewWizard {
    pub fn new(request: LoanRequest, client: ClientProfile) -> Self {
        ReviewWizard::with_policy(request, client, EvaluationPolicy::default())
    }

    pub fn with_policy(request: LoanRequest, client: ClientProfile, policy: EvaluationPolicy) -> Self {
        ReviewWizard {
            step: ReviewStep::ClientInfo,
            request,
            client,
            assertions: RuleAssertions::default(),
            policy,
        }
    }

    pub fn step(&self) -> ReviewStep {
        self.step
    }

    pub fn assertions(&self) -> &RuleAssertions {
        &self.assertions
    }

    /// Documents the officer should open on the documentation step.
    pub fn required_documents(&self) -> &'static [DocumentKind] {
        required_documents(self.request.loan_type)
    }

    /// Advance once the current step's data checks out.
    pub fn next(&mut self) -> MortgageCreditResult<ReviewStep> {
        self.step = match self.step {
            ReviewStep::ClientInfo => {
                self.client.validate()?;
                ReviewStep::LoanDetails
            }
            ReviewStep::LoanDetails => {
                self.request.validate()?;
                ReviewStep::Documentation
            }
            ReviewStep::Documentation => {
                if self.required_documents().is_empty() {
                    return Err(MortgageCreditError::validation(
                        "loan_type",
                        "No document set is defined for this request",
                    ));
                }
                ReviewStep::Evaluation
            }
            ReviewStep::Evaluation => return Err(wrong_step(self.step, "advance")),
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> MortgageCreditResult<ReviewStep> {
        self.step = match self.step {
            ReviewStep::ClientInfo => return Err(wrong_step(self.step, "go back")),
            ReviewStep::LoanDetails => ReviewStep::ClientInfo,
            ReviewStep::Documentation => ReviewStep::LoanDetails,
            ReviewStep::Evaluation => ReviewStep::Documentation,
        };
        Ok(self.step)
    }

    pub fn set_assertion(&mut self, rule: RuleId, value: bool) -> MortgageCreditResult<()> {
        if self.step != ReviewStep::Evaluation {
            return Err(wrong_step(self.step, "assert a rule"));
        }
        self.assertions.set(rule, value);
        Ok(())
    }

    pub fn evaluate(&self) -> MortgageCreditResult<EvaluationResult> {
        if self.step != ReviewStep::Evaluation {
            return Err(wrong_step(self.step, "evaluate"));
        }
        evaluate_with_policy(&self.request, &self.client, &self.assertions, &self.policy)
    }

    /// Final sign-off: every rule must be asserted, otherwise
    /// `IncompleteAssertions`.
    pub fn evaluate_strict(&self) -> MortgageCreditResult<EvaluationResult> {
        if self.step != ReviewStep::Evaluation {
            return Err(wrong_step(self.step, "evaluate"));
        }
        evaluate_strict_with_policy(&self.request, &self.client, &self.assertions, &self.policy)
    }
}
