//! Fixed-payment (French) amortization: the monthly installment of a loan and
//! the month-by-month split of each installment into interest and principal.

pub mod payment;
pub mod schedule;

pub use payment::{
    monthly_payment, monthly_payment_in, MAX_TERM_YEARS, MIN_TERM_YEARS, MONTHS_PER_YEAR,
};
pub use schedule::{
    amortization_schedule, amortization_schedule_in, AmortizationRow, AmortizationSchedule,
};
