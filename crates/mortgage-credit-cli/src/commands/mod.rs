pub mod amortization;
pub mod documents;
pub mod evaluation;
pub mod rut;
pub mod simulation;
