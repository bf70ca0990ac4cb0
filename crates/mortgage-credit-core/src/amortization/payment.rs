use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::MortgageCreditError;
use crate::types::{round_to_minor_unit, Currency, Money, Percent};
use crate::MortgageCreditResult;

pub const MONTHS_PER_YEAR: u32 = 12;
/// Shortest and longest mortgage term the bank writes, in years.
pub const MIN_TERM_YEARS: u32 = 1;
pub const MAX_TERM_YEARS: u32 = 30;

const PERCENT: Decimal = dec!(100);

/// Monthly installment of a fully amortizing loan, rounded to whole pesos.
///
/// `annual_rate_percent` is in percent units (4.5 = 4.5% per annum). A zero
/// rate degrades to `principal / n` since the annuity formula is undefined
/// there.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<Money> {
    monthly_payment_in(Currency::default(), principal, annual_rate_percent, term_years)
}

/// Same as [`monthly_payment`], rounded to the minor unit of `currency`.
pub fn monthly_payment_in(
    currency: Currency,
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<Money> {
    let exact = exact_monthly_payment(principal, annual_rate_percent, term_years)?;
    Ok(round_to_minor_unit(exact, currency))
}

/// Unrounded installment. The schedule builder works from this value so that
/// per-month rounding happens in one place.
pub(crate) fn exact_monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<Money> {
    let n = validate_terms(principal, annual_rate_percent, term_years)?;
    let periods = Decimal::from(n);

    if annual_rate_percent.is_zero() {
        return Ok(principal / periods);
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r).checked_powu(u64::from(n)).ok_or_else(|| {
        MortgageCreditError::invalid_input(
            "interest_rate",
            format!("compounding {annual_rate_percent}% over {n} months overflows"),
        )
    })?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        // Rate so small that (1+r)^n rounds to 1; the limit is simple division.
        return Ok(principal / periods);
    }

    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            MortgageCreditError::invalid_input("requested_amount", "payment computation overflows")
        })
}

/// Annual percent rate to a monthly fractional rate (4.5 → 0.00375).
pub(crate) fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / PERCENT / Decimal::from(MONTHS_PER_YEAR)
}

/// Range checks shared by the payment and schedule builders. Returns the
/// number of monthly installments.
pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<u32> {
    if principal <= Decimal::ZERO {
        return Err(MortgageCreditError::invalid_input(
            "requested_amount",
            "Principal must be greater than zero",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageCreditError::invalid_input(
            "interest_rate",
            "Interest rate cannot be negative",
        ));
    }
    if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&term_years) {
        return Err(MortgageCreditError::invalid_input(
            "term_years",
            format!("Term must be between {MIN_TERM_YEARS} and {MAX_TERM_YEARS} years, got {term_years}"),
        ));
    }
    term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        MortgageCreditError::invalid_input("term_years", "number of installments overflows")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_mortgage() {
        // 100M at 4.5% over 20 years: 632,649.376... per month
        let pmt = monthly_payment(dec!(100_000_000), dec!(4.5), 20).unwrap();
        assert_eq!(pmt, dec!(632_649));
    }

    #[test]
    fn test_exact_payment_before_rounding() {
        let exact = exact_monthly_payment(dec!(100_000_000), dec!(4.5), 20).unwrap();
        assert!((exact - dec!(632_649.3762)).abs() < dec!(0.001));
    }

    #[test]
    fn test_zero_rate_is_simple_division() {
        let pmt = monthly_payment(dec!(1_200_000), Decimal::ZERO, 10).unwrap();
        assert_eq!(pmt, dec!(10_000));
    }

    #[test]
    fn test_usd_rounds_to_cents() {
        let pmt = monthly_payment_in(Currency::USD, dec!(200_000), dec!(6), 30).unwrap();
        // Textbook value: 1,199.10
        assert_eq!(pmt, dec!(1199.10));
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let err = monthly_payment(Decimal::ZERO, dec!(4.5), 20).unwrap_err();
        assert!(matches!(
            err,
            MortgageCreditError::InvalidInput { ref field, .. } if field == "requested_amount"
        ));
        assert!(monthly_payment(dec!(-1), dec!(4.5), 20).is_err());
    }

    #[test]
    fn test_rejects_zero_term() {
        let err = monthly_payment(dec!(1_000_000), dec!(4.5), 0).unwrap_err();
        assert!(matches!(
            err,
            MortgageCreditError::InvalidInput { ref field, .. } if field == "term_years"
        ));
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert!(monthly_payment(dec!(1_000_000), dec!(-0.5), 5).is_err());
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(4.5)), dec!(0.00375));
    }
}
