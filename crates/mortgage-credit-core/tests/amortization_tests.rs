use mortgage_credit_core::amortization::{amortization_schedule, monthly_payment};
use mortgage_credit_core::{round_to_minor_unit, Currency, MortgageCreditError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference values
// ===========================================================================

#[test]
fn test_reference_payment_100m_4_5pct_20y() {
    let pmt = monthly_payment(dec!(100_000_000), dec!(4.5), 20).unwrap();
    assert_eq!(pmt, dec!(632_649));
}

#[test]
fn test_one_year_loan() {
    // 12,000,000 at 12% over 1 year: 1,066,185.46 -> 1,066,185
    let pmt = monthly_payment(dec!(12_000_000), dec!(12), 1).unwrap();
    assert_eq!(pmt, dec!(1_066_185));
}

#[test]
fn test_maximum_rate_and_term_stay_finite() {
    let pmt = monthly_payment(dec!(1_000_000_000), dec!(100), 30).unwrap();
    // At 100% p.a. the installment is essentially the monthly interest.
    let interest_only = dec!(1_000_000_000) / dec!(12);
    assert!(pmt >= round_to_minor_unit(interest_only, Currency::CLP));
    assert!(pmt < interest_only * dec!(1.01));
}

#[test]
fn test_invalid_inputs_name_the_field() {
    let cases = [
        (dec!(0), dec!(4.5), 20, "requested_amount"),
        (dec!(1_000), dec!(-1), 20, "interest_rate"),
        (dec!(1_000), dec!(4.5), 0, "term_years"),
    ];
    for (principal, rate, term, expected) in cases {
        match monthly_payment(principal, rate, term) {
            Err(MortgageCreditError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidInput on {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_term_outside_calculator_range() {
    for term in [31, 400_000_000, u32::MAX] {
        for rate in [Decimal::ZERO, dec!(4.5)] {
            match monthly_payment(dec!(1_000), rate, term) {
                Err(MortgageCreditError::InvalidInput { field, .. }) => {
                    assert_eq!(field, "term_years")
                }
                other => panic!("Expected InvalidInput on term {term}, got {other:?}"),
            }
            assert!(amortization_schedule(dec!(1_000), rate, term).is_err());
        }
    }
    assert!(monthly_payment(dec!(1_000), dec!(4.5), 30).is_ok());
}

// ===========================================================================
// Zero-rate limit
// ===========================================================================

#[test]
fn test_rate_to_zero_converges_to_simple_division() {
    let principal = dec!(120_000_000);
    let term = 10;
    let simple = principal / Decimal::from(term * 12);

    let mut last_gap = Decimal::MAX;
    for eps in [dec!(1), dec!(0.1), dec!(0.01), dec!(0.001), dec!(0.0001)] {
        let gap = (monthly_payment(principal, eps, term).unwrap() - simple).abs();
        assert!(gap <= last_gap, "gap grew at rate {eps}: {gap} > {last_gap}");
        last_gap = gap;
    }
    assert_eq!(monthly_payment(principal, dec!(0.000001), term).unwrap(), simple);
    assert_eq!(monthly_payment(principal, Decimal::ZERO, term).unwrap(), simple);
}

// ===========================================================================
// Schedule
// ===========================================================================

#[test]
fn test_schedule_balance_is_monotone() {
    let s = amortization_schedule(dec!(75_000_000), dec!(5.1), 25).unwrap();
    assert_eq!(s.rows.len(), 300);
    for pair in s.rows.windows(2) {
        assert!(pair[1].remaining_balance < pair[0].remaining_balance);
        // Interest share falls as principal is repaid
        assert!(pair[1].interest <= pair[0].interest);
    }
    assert_eq!(s.rows[299].remaining_balance, Decimal::ZERO);
}

// ===========================================================================
// Properties
// ===========================================================================

fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1_000_000i64..=2_000_000_000i64).prop_map(Decimal::from)
}

/// Rates from 0.01% to 100% in hundredths of a percent.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_payment_positive(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in 1u32..=30,
    ) {
        let pmt = monthly_payment(principal, rate, term).unwrap();
        prop_assert!(pmt > Decimal::ZERO);
        // Never less than straight-line repayment of principal
        prop_assert!(pmt >= round_to_minor_unit(principal / Decimal::from(term * 12), Currency::CLP));
    }

    #[test]
    fn prop_payment_monotone_in_rate(
        principal in principal_strategy(),
        rate in rate_strategy(),
        bump in 1i64..=500,
        term in 1u32..=30,
    ) {
        let higher = (rate + Decimal::new(bump, 2)).min(dec!(100));
        let low = monthly_payment(principal, rate, term).unwrap();
        let high = monthly_payment(principal, higher, term).unwrap();
        prop_assert!(high >= low, "rate {} -> {}, rate {} -> {}", rate, low, higher, high);
    }

    #[test]
    fn prop_payment_monotone_in_principal(
        principal in principal_strategy(),
        extra in 1i64..=100_000_000,
        rate in rate_strategy(),
        term in 1u32..=30,
    ) {
        let low = monthly_payment(principal, rate, term).unwrap();
        let high = monthly_payment(principal + Decimal::from(extra), rate, term).unwrap();
        prop_assert!(high >= low);
    }

    #[test]
    fn prop_rounding_idempotent(units in any::<i64>(), scale in 0u32..=10) {
        let amount = Decimal::new(units, scale);
        for currency in [Currency::CLP, Currency::CLF, Currency::USD] {
            let once = round_to_minor_unit(amount, currency);
            prop_assert_eq!(round_to_minor_unit(once, currency), once);
        }
    }
}
