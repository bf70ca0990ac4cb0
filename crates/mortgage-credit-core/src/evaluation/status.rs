use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::Decision;
use crate::error::MortgageCreditError;
use crate::MortgageCreditResult;

/// Lifecycle of a stored credit request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    InitialReview,
    UnderEvaluation,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and rejected requests are closed.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestStatus::InitialReview => "initial_review",
            RequestStatus::UnderEvaluation => "under_evaluation",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        })
    }
}

/// Status a request moves to once an evaluation produced `decision`.
///
/// The caller persists the returned status; a pending decision parks the
/// request in `under_evaluation` until the remaining assertions arrive.
pub fn apply_decision(
    current: RequestStatus,
    decision: Decision,
) -> MortgageCreditResult<RequestStatus> {
    let next = match decision {
        Decision::Approved => RequestStatus::Approved,
        Decision::Rejected => RequestStatus::Rejected,
        Decision::Pending => RequestStatus::UnderEvaluation,
    };

    if current.is_terminal() {
        return Err(MortgageCreditError::InvalidTransition {
            from: current.to_string(),
            to: next.to_string(),
        });
    }
    Ok(next)
}
