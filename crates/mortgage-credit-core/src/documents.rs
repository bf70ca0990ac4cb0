//! Loan types offered by the bank and the supporting documents each one
//! requires before a request can be evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MortgageCreditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    FirstDwelling,
    SecondDwelling,
    CommercialProperty,
    Renovation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    IncomeProof,
    PropertyValuation,
    CreditHistory,
    FirstPropertyDeed,
    FinancialStateBusiness,
    BusinessPlan,
    RenovationBudget,
}

impl LoanType {
    pub const ALL: [LoanType; 4] = [
        LoanType::FirstDwelling,
        LoanType::SecondDwelling,
        LoanType::CommercialProperty,
        LoanType::Renovation,
    ];

    /// Label the bank shows for the loan type.
    pub fn label(self) -> &'static str {
        match self {
            LoanType::FirstDwelling => "Primera Vivienda",
            LoanType::SecondDwelling => "Segunda Vivienda",
            LoanType::CommercialProperty => "Propiedades Comerciales",
            LoanType::Renovation => "Remodelación",
        }
    }

    /// Reverse of [`LoanType::label`]. Unknown labels are `None`, which callers
    /// treat as "no type selected yet".
    pub fn from_label(label: &str) -> Option<LoanType> {
        let label = label.trim();
        LoanType::ALL.into_iter().find(|t| t.label() == label)
    }

    fn wire_name(self) -> &'static str {
        match self {
            LoanType::FirstDwelling => "first_dwelling",
            LoanType::SecondDwelling => "second_dwelling",
            LoanType::CommercialProperty => "commercial_property",
            LoanType::Renovation => "renovation",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for LoanType {
    type Err = MortgageCreditError;

    /// Accepts the snake_case wire name or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        LoanType::ALL
            .into_iter()
            .find(|t| t.wire_name() == normalized)
            .or_else(|| LoanType::from_label(s))
            .ok_or_else(|| {
                MortgageCreditError::validation("loan_type", format!("unknown loan type '{s}'"))
            })
    }
}

impl DocumentKind {
    /// Key the document store files the upload under, per request.
    pub fn storage_key(self) -> &'static str {
        match self {
            DocumentKind::IncomeProof => "incomeProofPdf",
            DocumentKind::PropertyValuation => "propertyValuationPdf",
            DocumentKind::CreditHistory => "creditHistoryPdf",
            DocumentKind::FirstPropertyDeed => "firstPropertyDeedPdf",
            DocumentKind::FinancialStateBusiness => "financialStateBusinessPdf",
            DocumentKind::BusinessPlan => "businessPlanPdf",
            DocumentKind::RenovationBudget => "renovationBudgetPdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::IncomeProof => "Comprobante de Ingresos",
            DocumentKind::PropertyValuation => "Tasación de la Propiedad",
            DocumentKind::CreditHistory => "Historial Crediticio",
            DocumentKind::FirstPropertyDeed => "Escritura de la Primera Propiedad",
            DocumentKind::FinancialStateBusiness => "Estado Financiero del Negocio",
            DocumentKind::BusinessPlan => "Plan de Negocios",
            DocumentKind::RenovationBudget => "Presupuesto de Renovación",
        }
    }
}

/// Documents a loan type requires, in the order they are requested.
///
/// An unset loan type yields an empty slice; that is the normal state while a
/// request is still being filled in.
pub fn required_documents(loan_type: Option<LoanType>) -> &'static [DocumentKind] {
    use DocumentKind::*;

    match loan_type {
        Some(LoanType::FirstDwelling) => &[IncomeProof, PropertyValuation, CreditHistory],
        Some(LoanType::SecondDwelling) => &[
            IncomeProof,
            PropertyValuation,
            FirstPropertyDeed,
            CreditHistory,
        ],
        Some(LoanType::CommercialProperty) => &[
            FinancialStateBusiness,
            IncomeProof,
            PropertyValuation,
            BusinessPlan,
        ],
        Some(LoanType::Renovation) => &[IncomeProof, RenovationBudget, PropertyValuation],
        None => &[],
    }
}

/// Required documents not present in `provided`, in table order.
pub fn missing_documents(loan_type: Option<LoanType>, provided: &[DocumentKind]) -> Vec<DocumentKind> {
    required_documents(loan_type)
        .iter()
        .copied()
        .filter(|kind| !provided.contains(kind))
        .collect()
}
