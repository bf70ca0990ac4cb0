//! Client-facing payment simulation: what a loan would cost before any
//! request is filed.

pub mod credit_simulation;

pub use credit_simulation::{simulate_credit, SimulationInput, SimulationOutput};
