use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::MortgageCreditError;
use crate::MortgageCreditResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and ratios expressed in percent units (4.5 = 4.5%). Never as fractions.
pub type Percent = Decimal;

/// Currency of the loan. Determines the minor-unit precision payments are
/// rounded to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Chilean peso. No minor unit in practice.
    #[default]
    CLP,
    /// Unidad de Fomento, the inflation-indexed unit most Chilean mortgages
    /// are quoted in.
    CLF,
    USD,
    EUR,
}

impl Currency {
    /// Decimal places of the currency's minor unit.
    pub fn minor_units(self) -> u32 {
        match self {
            Currency::CLP => 0,
            Currency::CLF => 4,
            Currency::USD | Currency::EUR => 2,
        }
    }
}

/// Round an amount to the currency's minor unit, half-up (ties away from zero).
pub fn round_to_minor_unit(amount: Money, currency: Currency) -> Money {
    amount.round_dp_with_strategy(currency.minor_units(), RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a binary float arriving from an untyped boundary into a Decimal,
/// rejecting NaN, infinities and values outside Decimal's range.
pub fn decimal_from_f64(field: &str, value: f64) -> MortgageCreditResult<Decimal> {
    if !value.is_finite() {
        return Err(MortgageCreditError::invalid_input(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        MortgageCreditError::invalid_input(field, format!("{value} is out of decimal range"))
    })
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_clp() {
        assert_eq!(round_to_minor_unit(dec!(632649.5), Currency::CLP), dec!(632650));
        assert_eq!(round_to_minor_unit(dec!(632649.4999), Currency::CLP), dec!(632649));
    }

    #[test]
    fn test_round_minor_units_per_currency() {
        assert_eq!(round_to_minor_unit(dec!(10.125), Currency::USD), dec!(10.13));
        assert_eq!(round_to_minor_unit(dec!(18.123456), Currency::CLF), dec!(18.1235));
    }

    #[test]
    fn test_decimal_from_f64_rejects_non_finite() {
        assert!(decimal_from_f64("loan_amount", f64::NAN).is_err());
        assert!(decimal_from_f64("loan_amount", f64::INFINITY).is_err());
        match decimal_from_f64("interest_rate", f64::NEG_INFINITY) {
            Err(MortgageCreditError::InvalidInput { field, .. }) => {
                assert_eq!(field, "interest_rate")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_from_f64_accepts_finite() {
        assert_eq!(decimal_from_f64("x", 4.5).unwrap(), dec!(4.5));
    }
}
