pub mod amortization;
pub mod documents;
pub mod error;
pub mod evaluation;
pub mod rut;
pub mod types;

#[cfg(feature = "simulation")]
pub mod simulation;

#[cfg(feature = "workflow")]
pub mod workflow;

pub use error::MortgageCreditError;
pub use types::*;

/// Standard result type for all mortgage-credit operations
pub type MortgageCreditResult<T> = Result<T, MortgageCreditError>;
