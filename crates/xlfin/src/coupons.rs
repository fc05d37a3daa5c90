//! Coupon-period functions.
//!
//! Each function rebuilds the [`CouponSchedule`] for its arguments; nothing
//! is cached between calls.

use xlfin_core::daycounts::{year_fraction, DayCountBasis};
use xlfin_core::error::FinResult;
use xlfin_core::schedule::{CouponPeriod, CouponSchedule};
use xlfin_core::types::{Date, Frequency};

use crate::config::FinancialConfig;

/// Builds the schedule, checking settlement against `issue` when given.
fn schedule(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    issue: Option<Date>,
) -> FinResult<CouponSchedule> {
    match issue {
        Some(issue) => CouponSchedule::with_issue(settlement, maturity, issue, frequency),
        None => CouponSchedule::new(settlement, maturity, frequency),
    }
}

/// Day counts of the coupon period containing `settlement`.
///
/// # Errors
///
/// `InvalidRange` if settlement is not before maturity, or precedes
/// `issue` when one is given.
pub fn coupon_period(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    basis: DayCountBasis,
    issue: Option<Date>,
) -> FinResult<CouponPeriod> {
    Ok(schedule(settlement, maturity, frequency, issue)?.period(basis))
}

/// Days in the coupon period that contains the settlement date.
///
/// `360 / frequency` for the 30/360 bases, the actual length of the period
/// for the other bases.
pub fn coup_days(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    basis: DayCountBasis,
    issue: Option<Date>,
) -> FinResult<i64> {
    Ok(coupon_period(settlement, maturity, frequency, basis, issue)?.days_in_period)
}

/// Days from the beginning of the coupon period to the settlement date.
pub fn coup_days_bs(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    basis: DayCountBasis,
    issue: Option<Date>,
) -> FinResult<i64> {
    Ok(coupon_period(settlement, maturity, frequency, basis, issue)?.accrued_days)
}

/// Days from the settlement date to the next coupon date.
pub fn coup_days_nc(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    basis: DayCountBasis,
    issue: Option<Date>,
) -> FinResult<i64> {
    Ok(coupon_period(settlement, maturity, frequency, basis, issue)?.days_to_next)
}

/// Number of coupons payable between settlement and maturity.
pub fn coup_num(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    issue: Option<Date>,
) -> FinResult<u32> {
    Ok(schedule(settlement, maturity, frequency, issue)?.periods_remaining())
}

/// Previous coupon date on or before settlement.
pub fn coup_pcd(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    issue: Option<Date>,
) -> FinResult<Date> {
    Ok(schedule(settlement, maturity, frequency, issue)?.previous_coupon())
}

/// Next coupon date after settlement.
pub fn coup_ncd(
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    issue: Option<Date>,
) -> FinResult<Date> {
    Ok(schedule(settlement, maturity, frequency, issue)?.next_coupon())
}

/// Fraction of a year between two dates under `basis`.
///
/// `frequency` only matters for Actual/Actual under the coupon-period
/// convention, where it sets the length of the quasi-coupon periods.
pub fn year_frac(
    start: Date,
    end: Date,
    frequency: Frequency,
    basis: DayCountBasis,
    config: &FinancialConfig,
) -> FinResult<f64> {
    year_fraction(start, end, basis, frequency, config.actual_actual)
}
