use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::MortgageCreditError;
use crate::types::{Money, Percent};
use crate::MortgageCreditResult;

/// Decimal places ratios are reported at.
pub const RATIO_DP: u32 = 2;

const HUNDRED: Decimal = dec!(100);

/// Monthly installment as a percentage of monthly salary, unrounded. Zero
/// when there is no declared salary.
pub fn payment_to_income(
    monthly_payment: Money,
    monthly_salary: Money,
) -> MortgageCreditResult<Percent> {
    percent_of_income(monthly_payment, monthly_salary)
}

/// Existing expenses plus the new installment as a percentage of monthly
/// salary, unrounded. Zero when there is no declared salary.
pub fn debt_to_income(
    monthly_expenses: Money,
    monthly_payment: Money,
    monthly_salary: Money,
) -> MortgageCreditResult<Percent> {
    let obligations = monthly_expenses.checked_add(monthly_payment).ok_or_else(|| {
        MortgageCreditError::invalid_input(
            "monthly_expenses",
            "expenses plus installment exceed the representable range",
        )
    })?;
    percent_of_income(obligations, monthly_salary)
}

/// Client age on the date the last installment falls due.
pub fn age_at_term_end(age: u32, term_years: u32) -> MortgageCreditResult<u32> {
    age.checked_add(term_years).ok_or_else(|| {
        MortgageCreditError::invalid_input(
            "age",
            format!("{age} plus a {term_years}-year term overflows"),
        )
    })
}

/// Ratio as shown to underwriters: half-up at [`RATIO_DP`] places.
pub fn round_ratio(ratio: Percent) -> Percent {
    ratio.round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn percent_of_income(obligation: Money, monthly_salary: Money) -> MortgageCreditResult<Percent> {
    if monthly_salary <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    obligation
        .checked_div(monthly_salary)
        .and_then(|share| share.checked_mul(HUNDRED))
        .ok_or_else(|| {
            MortgageCreditError::invalid_input(
                "monthly_salary",
                format!("salary {monthly_salary} is too small to express obligations against"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_to_income() {
        assert_eq!(payment_to_income(dec!(300_000), dec!(1_000_000)).unwrap(), dec!(30));
    }

    #[test]
    fn test_debt_to_income_boundary() {
        assert_eq!(
            debt_to_income(dec!(100_000), dec!(300_000), dec!(1_000_000)).unwrap(),
            dec!(40)
        );
    }

    #[test]
    fn test_zero_salary_yields_zero() {
        assert_eq!(payment_to_income(dec!(300_000), Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(debt_to_income(dec!(1), dec!(1), Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_ratio_is_not_rounded() {
        let exact = payment_to_income(dec!(632_649), dec!(2_530_192)).unwrap();
        assert!(exact > dec!(25));
        assert_eq!(round_ratio(exact), dec!(25.00));
    }

    #[test]
    fn test_round_ratio_half_up() {
        assert_eq!(round_ratio(payment_to_income(dec!(1), dec!(3)).unwrap()), dec!(33.33));
        // 0.125% rounds half-up
        assert_eq!(round_ratio(payment_to_income(dec!(1.25), dec!(1000)).unwrap()), dec!(0.13));
    }

    #[test]
    fn test_age_at_term_end() {
        assert_eq!(age_at_term_end(58, 20).unwrap(), 78);
    }

    #[test]
    fn test_age_overflow_names_age() {
        match age_at_term_end(u32::MAX, 20) {
            Err(MortgageCreditError::InvalidInput { field, .. }) => assert_eq!(field, "age"),
            other => panic!("Expected InvalidInput on age, got {other:?}"),
        }
    }

    #[test]
    fn test_expense_overflow_names_expenses() {
        match debt_to_income(Decimal::MAX, dec!(632_649), dec!(1_000_000)) {
            Err(MortgageCreditError::InvalidInput { field, .. }) => {
                assert_eq!(field, "monthly_expenses")
            }
            other => panic!("Expected InvalidInput on monthly_expenses, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_salary_names_salary() {
        let salary = Decimal::new(1, 22);
        match payment_to_income(dec!(632_649), salary) {
            Err(MortgageCreditError::InvalidInput { field, .. }) => {
                assert_eq!(field, "monthly_salary")
            }
            other => panic!("Expected InvalidInput on monthly_salary, got {other:?}"),
        }
    }
}
