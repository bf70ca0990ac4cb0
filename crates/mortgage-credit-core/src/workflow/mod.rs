//! Step-by-step flows for filing a credit request and for reviewing one.
//!
//! Each wizard is a finite-state machine: a transition only happens through a
//! method call, and only after the data gathered on the current step
//! validates. Calling a method in the wrong step is an `InvalidStep` error.

pub mod review;
pub mod submission;

pub use review::{ReviewStep, ReviewWizard};
pub use submission::{LoanApplication, SubmissionStep, SubmissionWizard};

use std::fmt;

use crate::error::MortgageCreditError;

fn wrong_step(step: impl fmt::Display, action: &str) -> MortgageCreditError {
    MortgageCreditError::InvalidStep {
        step: step.to_string(),
        action: action.to_string(),
    }
}
