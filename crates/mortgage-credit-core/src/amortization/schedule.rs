use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payment::{exact_monthly_payment, monthly_rate, validate_terms};
use crate::error::MortgageCreditError;
use crate::types::{round_to_minor_unit, Currency, Money, Percent};
use crate::MortgageCreditResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub currency: Currency,
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

/// Build the month-by-month schedule of a fixed-payment loan in the default
/// currency.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<AmortizationSchedule> {
    amortization_schedule_in(Currency::default(), principal, annual_rate_percent, term_years)
}

/// Build the schedule with every amount rounded to `currency`'s minor unit.
///
/// Interest is rounded each month and the last installment absorbs the
/// accumulated rounding residual, so the balance closes at exactly zero.
pub fn amortization_schedule_in(
    currency: Currency,
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageCreditResult<AmortizationSchedule> {
    let n = validate_terms(principal, annual_rate_percent, term_years)?;
    let installment = round_to_minor_unit(
        exact_monthly_payment(principal, annual_rate_percent, term_years)?,
        currency,
    );
    let r = monthly_rate(annual_rate_percent);

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = round_to_minor_unit(principal, currency);
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        let interest = round_to_minor_unit(balance * r, currency);
        let mut principal_part = installment - interest;
        if month == n || principal_part > balance {
            principal_part = balance;
        }
        let payment = interest + principal_part;
        balance -= principal_part;

        total_paid = total_paid.checked_add(payment).ok_or_else(overflow)?;
        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;

        rows.push(AmortizationRow {
            month,
            payment,
            interest,
            principal: principal_part,
            remaining_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    Ok(AmortizationSchedule {
        currency,
        monthly_payment: installment,
        number_of_payments: rows.len() as u32,
        total_paid,
        total_interest,
        rows,
    })
}

fn overflow() -> MortgageCreditError {
    MortgageCreditError::invalid_input("requested_amount", "total repaid overflows")
}
