use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::wrong_step;
use crate::documents::{missing_documents, required_documents, DocumentKind};
use crate::error::MortgageCreditError;
use crate::evaluation::{LoanRequest, RequestStatus};
use crate::rut::Rut;
use crate::MortgageCreditResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    Identification,
    LoanDetails,
    Documentation,
    Confirmation,
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubmissionStep::Identification => "identification",
            SubmissionStep::LoanDetails => "loan details",
            SubmissionStep::Documentation => "documentation",
            SubmissionStep::Confirmation => "confirmation",
        })
    }
}

/// A complete request ready to be handed to the request service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub rut: Rut,
    pub request: LoanRequest,
    pub documents: Vec<DocumentKind>,
}

/// Client-side flow for filing a credit request:
/// identification → loan details → documentation → confirmation.
#[derive(Debug, Clone)]
pub struct SubmissionWizard {
    step: SubmissionStep,
    rut: Option<Rut>,
    request: Option<LoanRequest>,
    attached: BTreeSet<DocumentKind>,
}

impl Default for SubmissionWizard {
    fn default() -> Self {
        SubmissionWizard::new()
    }
}

impl SubmissionWizard {
    pub fn new() -> Self {
        SubmissionWizard {
            step: SubmissionStep::Identification,
            rut: None,
            request: None,
            attached: BTreeSet::new(),
        }
    }

    pub fn step(&self) -> SubmissionStep {
        self.step
    }

    pub fn request(&self) -> Option<&LoanRequest> {
        self.request.as_ref()
    }

    pub fn identify(&mut self, raw_rut: &str) -> MortgageCreditResult<()> {
        self.require_step(SubmissionStep::Identification, "identify the client")?;
        self.rut = Some(Rut::parse(raw_rut)?);
        self.step = SubmissionStep::LoanDetails;
        Ok(())
    }

    /// Record the loan terms. Picking a different loan type than before drops
    /// documents attached for the old one.
    pub fn enter_loan_details(&mut self, request: LoanRequest) -> MortgageCreditResult<()> {
        self.require_step(SubmissionStep::LoanDetails, "enter loan details")?;
        request.validate()?;

        let previous_type = self.request.as_ref().and_then(|r| r.loan_type);
        if previous_type != request.loan_type {
            self.attached.clear();
        }
        self.request = Some(request);
        self.step = SubmissionStep::Documentation;
        Ok(())
    }

    pub fn attach(&mut self, kind: DocumentKind) -> MortgageCreditResult<()> {
        self.require_step(SubmissionStep::Documentation, "attach a document")?;
        let loan_type = self.request.as_ref().and_then(|r| r.loan_type);
        if !required_documents(loan_type).contains(&kind) {
            return Err(MortgageCreditError::validation(
                "documents",
                format!("{} is not requested for this loan type", kind.label()),
            ));
        }
        self.attached.insert(kind);
        Ok(())
    }

    /// Required documents not attached yet, in request order.
    pub fn missing_documents(&self) -> Vec<DocumentKind> {
        let loan_type = self.request.as_ref().and_then(|r| r.loan_type);
        let attached: Vec<DocumentKind> = self.attached.iter().copied().collect();
        missing_documents(loan_type, &attached)
    }

    /// Finish the flow once every required document is attached.
    pub fn confirm(&mut self) -> MortgageCreditResult<LoanApplication> {
        self.require_step(SubmissionStep::Documentation, "confirm the request")?;

        let missing = self.missing_documents();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|k| k.label()).collect();
            return Err(MortgageCreditError::validation(
                "documents",
                format!("missing {}", labels.join(", ")),
            ));
        }

        let (Some(rut), Some(request)) = (self.rut.clone(), self.request.clone()) else {
            return Err(wrong_step(self.step, "confirm without client and loan details"));
        };

        let loan_type = request.loan_type;
        let application = LoanApplication {
            rut,
            request: LoanRequest {
                status: RequestStatus::InitialReview,
                ..request
            },
            documents: required_documents(loan_type).to_vec(),
        };
        self.step = SubmissionStep::Confirmation;
        Ok(application)
    }

    pub fn back(&mut self) -> MortgageCreditResult<()> {
        self.step = match self.step {
            SubmissionStep::LoanDetails => SubmissionStep::Identification,
            SubmissionStep::Documentation => SubmissionStep::LoanDetails,
            SubmissionStep::Identification | SubmissionStep::Confirmation => {
                return Err(wrong_step(self.step, "go back"));
            }
        };
        Ok(())
    }

    fn require_step(&self, step: SubmissionStep, action: &str) -> MortgageCreditResult<()> {
        if self.step != step {
            return Err(wrong_step(self.step, action));
        }
        Ok(())
    }
}
