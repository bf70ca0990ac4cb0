use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::status::RequestStatus;
pub use crate::amortization::{MAX_TERM_YEARS, MIN_TERM_YEARS};
use crate::documents::LoanType;
use crate::error::MortgageCreditError;
use crate::rut::Rut;
use crate::types::{Money, Percent};
use crate::MortgageCreditResult;

pub const MAX_INTEREST_RATE: Percent = dec!(100);

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A credit request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub requested_amount: Money,
    pub term_years: u32,
    /// Annual rate in percent (4.5 = 4.5%).
    pub interest_rate: Percent,
    /// `None` until the client picks a loan type.
    #[serde(default)]
    pub loan_type: Option<LoanType>,
    /// Existing monthly obligations. Absent means none declared.
    #[serde(default)]
    pub monthly_expenses: Money,
    #[serde(default)]
    pub status: RequestStatus,
}

/// Client data as held by the client-management service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub rut: String,
    pub name: String,
    pub age: u32,
    pub monthly_salary: Money,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl LoanRequest {
    /// Range checks on the numeric terms plus presence of a loan type.
    pub fn validate(&self) -> MortgageCreditResult<LoanType> {
        validate_loan_terms(self.requested_amount, self.interest_rate, self.term_years)?;
        if self.monthly_expenses < Decimal::ZERO {
            return Err(MortgageCreditError::invalid_input(
                "monthly_expenses",
                "Monthly expenses cannot be negative",
            ));
        }
        self.loan_type
            .ok_or_else(|| MortgageCreditError::validation("loan_type", "A loan type must be selected"))
    }
}

impl ClientProfile {
    /// Identifier checksum and required fields. Returns the parsed RUT.
    pub fn validate(&self) -> MortgageCreditResult<Rut> {
        let rut = Rut::parse(&self.rut)?;
        if self.name.trim().is_empty() {
            return Err(MortgageCreditError::validation("name", "Client name is required"));
        }
        if self.age == 0 {
            return Err(MortgageCreditError::invalid_input(
                "age",
                "Age must be greater than zero",
            ));
        }
        if self.monthly_salary < Decimal::ZERO {
            return Err(MortgageCreditError::invalid_input(
                "monthly_salary",
                "Monthly salary cannot be negative",
            ));
        }
        Ok(rut)
    }
}

/// Amount, rate and term bounds shared by requests and simulations.
pub fn validate_loan_terms(
    requested_amount: Money,
    interest_rate: Percent,
    term_years: u32,
) -> MortgageCreditResult<()> {
    if requested_amount <= Decimal::ZERO {
        return Err(MortgageCreditError::invalid_input(
            "requested_amount",
            "Requested amount must be greater than zero",
        ));
    }
    if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&term_years) {
        return Err(MortgageCreditError::invalid_input(
            "term_years",
            format!("Term must be between {MIN_TERM_YEARS} and {MAX_TERM_YEARS} years, got {term_years}"),
        ));
    }
    if interest_rate <= Decimal::ZERO || interest_rate > MAX_INTEREST_RATE {
        return Err(MortgageCreditError::invalid_input(
            "interest_rate",
            format!("Interest rate must be in (0, {MAX_INTEREST_RATE}]%, got {interest_rate}"),
        ));
    }
    Ok(())
}
